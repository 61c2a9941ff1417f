//! File-name grammar and chronological ordering of sources.
//!
//! Recognized names:
//! - `YYYY.csv` — year granularity, sorts at the start of the year
//! - `YYYY-MM-DD.csv` — exact date
//!
//! Anything else is not event data and is dropped without complaint.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use liftrec_types::SourceDate;

fn file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})(?:-(\d{2})-(\d{2}))?\.csv$").expect("source file pattern is valid")
    })
}

/// A recognized source: its chronological position and display name.
///
/// Ordering: `date` → `name`, which is the replay order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceMeta {
    pub date: SourceDate,
    /// File name, e.g. `2024-03-09.csv`.
    pub name: String,
}

impl SourceMeta {
    /// Recognize a file name, or `None` when it is not a result file.
    pub fn from_name(name: &str) -> Option<Self> {
        parse_source_name(name).map(|date| Self {
            date,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for SourceMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parse the date embedded in a result file name.
///
/// Month and day are `0` when the name only carries a year. Out-of-range
/// months or days are kept as written; they still order deterministically.
///
/// # Examples
///
/// ```
/// use liftrec_source::parse_source_name;
///
/// let date = parse_source_name("2024-03-09.csv").unwrap();
/// assert_eq!((date.year, date.month, date.day), (2024, 3, 9));
/// assert!(parse_source_name("2024.csv").is_some());
/// assert!(parse_source_name("notes.csv").is_none());
/// ```
pub fn parse_source_name(name: &str) -> Option<SourceDate> {
    let captures = file_pattern().captures(name)?;
    let number = |index: usize| -> Option<u32> {
        match captures.get(index) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    let year = captures.get(1)?.as_str().parse().ok()?;
    Some(SourceDate {
        year,
        month: number(2)?,
        day: number(3)?,
    })
}

/// Sort sources into replay order: ascending `(year, month, day, name)`.
///
/// A total sort, so the result does not depend on input order.
pub fn sequence(candidates: impl IntoIterator<Item = SourceMeta>) -> Vec<SourceMeta> {
    let mut sources: Vec<SourceMeta> = candidates.into_iter().collect();
    sources.sort();
    sources
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn names(sources: &[SourceMeta]) -> Vec<&str> {
        sources.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn parse_year_only() {
        let date = parse_source_name("2023.csv").unwrap();
        assert_eq!(date, SourceDate::year(2023));
        assert!(!date.has_day_precision());
    }

    #[test]
    fn parse_exact_date() {
        let date = parse_source_name("2023-11-04.csv").unwrap();
        assert_eq!((date.year, date.month, date.day), (2023, 11, 4));
        assert!(date.has_day_precision());
    }

    #[test]
    fn reject_unrecognized_names() {
        for name in [
            "23.csv",
            "2023.txt",
            "2023-1-4.csv",
            "2023-11.csv",
            "records-2023.csv",
            "2023.csv.bak",
            "README.md",
        ] {
            assert!(parse_source_name(name).is_none(), "{name} should be ignored");
        }
    }

    #[test]
    fn annual_files_sort_before_dated_files() {
        let sorted = sequence(
            ["2024-02-01.csv", "2024.csv", "2023-12-31.csv", "2023.csv"]
                .into_iter()
                .filter_map(SourceMeta::from_name),
        );
        assert_eq!(
            names(&sorted),
            vec!["2023.csv", "2023-12-31.csv", "2024.csv", "2024-02-01.csv"]
        );
    }

    #[test]
    fn empty_input_sequences_to_empty() {
        assert!(sequence(Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn sequencing_is_order_independent(
            dates in prop::collection::vec((2000i32..2030, 0u32..13, 0u32..29), 0..12),
            seed in any::<u64>(),
        ) {
            let metas: Vec<SourceMeta> = dates
                .iter()
                .enumerate()
                .map(|(i, (y, m, d))| SourceMeta {
                    date: SourceDate { year: *y, month: *m, day: *d },
                    name: format!("src-{i}"),
                })
                .collect();

            let mut shuffled = metas.clone();
            let len = shuffled.len().max(1);
            shuffled.rotate_left((seed as usize) % len);
            shuffled.reverse();

            let once = sequence(metas.clone());
            prop_assert_eq!(&once, &sequence(shuffled));
            prop_assert_eq!(&once, &sequence(once.clone()));
            for pair in once.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }
}
