use std::io::Read;

use crate::error::{Result, SourceError};
use crate::reader::{AttemptReader, ReadMode};
use crate::sequencer::{sequence, SourceMeta};
use crate::traits::SourceFeed;

/// In-memory result files, keyed by file name.
///
/// Names go through the same grammar as [`DirectoryFeed`](crate::DirectoryFeed),
/// so unrecognized names are invisible to [`SourceFeed::sources`].
#[derive(Clone, Debug, Default)]
pub struct MemoryFeed {
    files: Vec<(String, String)>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file with the given CSV contents.
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        let name = name.into();
        let contents = contents.into();
        match self.files.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = contents,
            None => self.files.push((name, contents)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents);
        self
    }
}

impl SourceFeed for MemoryFeed {
    fn sources(&self) -> Result<Vec<SourceMeta>> {
        Ok(sequence(
            self.files
                .iter()
                .filter_map(|(name, _)| SourceMeta::from_name(name)),
        ))
    }

    fn open(
        &self,
        source: &SourceMeta,
        mode: ReadMode,
    ) -> Result<AttemptReader<Box<dyn Read + '_>>> {
        let (_, contents) = self
            .files
            .iter()
            .find(|(name, _)| *name == source.name)
            .ok_or_else(|| SourceError::NotFound(source.name.clone()))?;
        let input: Box<dyn Read + '_> = Box::new(contents.as_bytes());
        Ok(AttemptReader::new(source.name.clone(), input, mode))
    }
}
