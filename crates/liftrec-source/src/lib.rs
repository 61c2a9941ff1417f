//! Result-file discovery and parsing for liftrec.
//!
//! A result file is one CSV named `YYYY.csv` or `YYYY-MM-DD.csv`. This crate
//! turns a collection of such files into the chronologically ordered stream
//! of attempts the ledger replays.
//!
//! # Modules
//!
//! - [`sequencer`] — file-name grammar and the `(year, month, day, name)` sort
//! - [`reader`] — lazy row parsing into [`RowOutcome`](liftrec_types::RowOutcome)s
//! - [`traits`] — the [`SourceFeed`] trait the replay engine consumes
//! - [`directory`] — [`DirectoryFeed`] over a directory on disk
//! - [`memory`] — [`MemoryFeed`] for tests and embedding

pub mod directory;
pub mod error;
pub mod memory;
pub mod reader;
pub mod sequencer;
pub mod traits;

pub use directory::DirectoryFeed;
pub use error::{Result, SourceError};
pub use memory::MemoryFeed;
pub use reader::{AttemptReader, ReadMode};
pub use sequencer::{parse_source_name, sequence, SourceMeta};
pub use traits::SourceFeed;
