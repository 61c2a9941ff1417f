//! Foundation types for liftrec.
//!
//! This crate provides the vocabulary shared by every other liftrec crate:
//! the classification key a record is filed under, the chronological
//! position of a result file, and the attempts parsed out of it.
//!
//! # Key Types
//!
//! - [`ClassificationKey`] — `sex|division[-D]|event|equipment|class|lift`
//! - [`Division`] — age/experience bracket plus the drug-tested flag
//! - [`Keyspace`] — the closed set of legal classification keys
//! - [`SourceDate`] — `(year, month, day)` with optional month/day
//! - [`Attempt`] / [`RowOutcome`] — one parsed result row, or why it was skipped

pub mod attempt;
pub mod error;
pub mod key;
pub mod keyspace;
pub mod temporal;

pub use attempt::{Attempt, RowOutcome, SkipReason};
pub use error::TypeError;
pub use key::{ClassificationKey, Division, Equipment, Event, Lift, Sex};
pub use keyspace::Keyspace;
pub use temporal::{RecordAge, SourceDate};
