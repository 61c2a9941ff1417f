use std::io::Read;

use crate::error::Result;
use crate::reader::{AttemptReader, ReadMode};
use crate::sequencer::SourceMeta;

/// Read boundary between result storage and the replay engine.
pub trait SourceFeed {
    /// Every recognized source, already in replay order.
    fn sources(&self) -> Result<Vec<SourceMeta>>;

    /// Open one source for row-by-row reading.
    fn open(&self, source: &SourceMeta, mode: ReadMode)
        -> Result<AttemptReader<Box<dyn Read + '_>>>;
}
