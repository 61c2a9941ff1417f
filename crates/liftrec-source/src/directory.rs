use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SourceError};
use crate::reader::{AttemptReader, ReadMode};
use crate::sequencer::{sequence, SourceMeta};
use crate::traits::SourceFeed;

/// Result files stored directly inside one directory (not recursive).
#[derive(Clone, Debug)]
pub struct DirectoryFeed {
    root: PathBuf,
}

impl DirectoryFeed {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// An entry below the root that cannot be a source: a dangling link, or a
/// name outside the file grammar. Failures on the root itself still count.
fn is_unusable_entry(err: &walkdir::Error) -> bool {
    if err.depth() == 0 {
        return false;
    }
    let dangling = err
        .io_error()
        .is_some_and(|io| io.kind() == io::ErrorKind::NotFound);
    let unrelated = err
        .path()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map_or(true, |name| SourceMeta::from_name(name).is_none());
    dangling || unrelated
}

impl SourceFeed for DirectoryFeed {
    fn sources(&self) -> Result<Vec<SourceMeta>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_unusable_entry(&err) => {
                    debug!(path = ?err.path(), %err, "skipping unreadable entry");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            match SourceMeta::from_name(name) {
                Some(meta) => found.push(meta),
                None => debug!(name, "ignoring non-result file"),
            }
        }
        let sources = sequence(found);
        debug!(root = %self.root.display(), count = sources.len(), "discovered sources");
        Ok(sources)
    }

    fn open(
        &self,
        source: &SourceMeta,
        mode: ReadMode,
    ) -> Result<AttemptReader<Box<dyn Read + '_>>> {
        let path = self.root.join(&source.name);
        let file = File::open(&path).map_err(|err| SourceError::Io { path, source: err })?;
        let input: Box<dyn Read + '_> = Box::new(file);
        Ok(AttemptReader::new(source.name.clone(), input, mode))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use liftrec_types::RowOutcome;

    use super::*;

    #[test]
    fn lists_only_result_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2024.csv", "2023-06-01.csv", "2023.csv", "notes.txt", "draft.csv"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("2022.csv")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("2021.csv"), "").unwrap();

        let feed = DirectoryFeed::new(dir.path());
        let names: Vec<String> = feed
            .sources()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["2023.csv", "2023-06-01.csv", "2024.csv"]);
    }

    #[test]
    fn empty_directory_has_no_sources() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DirectoryFeed::new(dir.path()).sources().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_links_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2023.csv"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.csv"), dir.path().join("latest.csv"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.csv"), dir.path().join("2024.csv"))
            .unwrap();

        let names: Vec<String> = DirectoryFeed::new(dir.path())
            .sources()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["2023.csv"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let feed = DirectoryFeed::new(dir.path().join("absent"));
        assert!(feed.sources().is_err());
    }

    #[test]
    fn open_reads_rows() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("2024.csv"),
            "M|Open|SBD|Wraps|90|S,200,Alice\nM|Open|SBD|Wraps|90|S,oops,Bob\n",
        )
        .unwrap();

        let feed = DirectoryFeed::new(dir.path());
        let sources = feed.sources().unwrap();
        let rows: Vec<RowOutcome> = feed
            .open(&sources[0], ReadMode::Check)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attempt().unwrap().lifter, "Alice");
        assert!(rows[1].attempt().is_none());
    }

    #[test]
    fn open_vanished_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let feed = DirectoryFeed::new(dir.path());
        let meta = SourceMeta::from_name("2024.csv").unwrap();
        let err = feed.open(&meta, ReadMode::Check).err().unwrap();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("2024.csv"));
    }
}
