//! Record ledger replay for liftrec.
//!
//! This crate is the heart of liftrec. It provides:
//! - [`RecordLedger`]: the per-key table of current best lifts
//! - [`ReplayEngine`]: deterministic replay of every source, oldest first
//! - [`RecordValidator`]: unrecognized-key and non-increasing-record checks
//! - [`WrappedBuilder`]: year-end aggregates and rankings
//!
//! Replay always starts from an empty ledger. Sources are applied in
//! `(year, month, day, name)` order and rows in file order, so two runs over
//! the same files produce identical output.

pub mod error;
pub mod ledger;
pub mod projection;
pub mod records;
pub mod replay;
pub mod validation;

pub use error::{LedgerError, Result};
pub use ledger::RecordLedger;
pub use projection::{PercentGlowUp, Tally, WrappedBuilder, WrappedReport};
pub use records::{Classification, ImprovementEvent, LedgerEntry};
pub use replay::{ReplayEngine, ReplayResult, ReplayStep, ReplaySummary};
pub use validation::{RecordValidator, SkippedRow, ValidationReport, Warning};
