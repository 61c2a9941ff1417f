use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use liftrec_source::{ReadMode, SourceFeed};
use liftrec_types::{Keyspace, SkipReason};

use crate::error::LedgerError;
use crate::records::Classification;
use crate::replay::{ReplayEngine, ReplayStep};

/// Outcome of checking every result file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub files_checked: usize,
    /// Findings in (source, row) order. Never deduplicated.
    pub warnings: Vec<Warning>,
    /// Rows dropped because their weight did not parse.
    pub skipped_rows: Vec<SkippedRow>,
}

impl ValidationReport {
    /// Returns `true` if no warnings were raised.
    ///
    /// Skipped rows are reported but do not make a report dirty.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A data-quality finding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// No file in the root matched the naming convention.
    NoSources,
    UnrecognizedKey {
        key: String,
        source: String,
        row: u64,
        lifter: String,
    },
    /// A key was reported again without beating its standing entry.
    NonIncreasing {
        key: String,
        source: String,
        row: u64,
        weight: f64,
        previous_weight: f64,
        previous_source: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSources => write!(
                f,
                "No CSV files matching pattern YYYY.csv or YYYY-MM-DD.csv were found."
            ),
            Self::UnrecognizedKey {
                key,
                source,
                row,
                lifter,
            } => {
                write!(f, "Unrecognized key '{key}' in {source}:{row}")?;
                if !lifter.is_empty() {
                    write!(f, " ({lifter})")?;
                }
                Ok(())
            }
            Self::NonIncreasing {
                key,
                source,
                row,
                weight,
                previous_weight,
                previous_source,
            } => write!(
                f,
                "Non-increasing record for '{key}' in {source}:{row}: \
                 {weight:?} <= {previous_weight:?} (last set in {previous_source})"
            ),
        }
    }
}

/// A row whose weight column could not be read as a number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub source: String,
    pub row: u64,
    pub raw_weight: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping row with invalid weight in {}:{}: '{}'",
            self.source, self.row, self.raw_weight
        )
    }
}

/// Key and monotonicity checker over a full replay.
pub struct RecordValidator;

impl RecordValidator {
    /// Check every source of `feed` against `keyspace`.
    ///
    /// An unrecognized key is still ledgered, so later rows for the same key
    /// are checked for monotonicity like any other.
    pub fn check<F: SourceFeed + ?Sized>(
        feed: &F,
        keyspace: &Keyspace,
    ) -> Result<ValidationReport, LedgerError> {
        let sources = feed.sources()?;
        if sources.is_empty() {
            info!("no result files found");
            return Ok(ValidationReport {
                files_checked: 0,
                warnings: vec![Warning::NoSources],
                skipped_rows: Vec::new(),
            });
        }

        let mut warnings = Vec::new();
        let mut skipped_rows = Vec::new();

        ReplayEngine::replay_sources(feed, &sources, ReadMode::Check, |step| match step {
            ReplayStep::Skipped {
                source,
                row,
                reason: SkipReason::InvalidWeight(raw),
            } => skipped_rows.push(SkippedRow {
                source: source.name.clone(),
                row,
                raw_weight: raw.clone(),
            }),
            ReplayStep::Skipped { .. } => {}
            ReplayStep::Classified {
                source,
                attempt,
                classification,
            } => {
                if !keyspace.contains(&attempt.key) {
                    warnings.push(Warning::UnrecognizedKey {
                        key: attempt.key.clone(),
                        source: source.name.clone(),
                        row: attempt.row,
                        lifter: attempt.lifter.clone(),
                    });
                }
                if let Classification::NotImproved { previous } = classification {
                    warnings.push(Warning::NonIncreasing {
                        key: attempt.key.clone(),
                        source: source.name.clone(),
                        row: attempt.row,
                        weight: attempt.weight,
                        previous_weight: previous.weight,
                        previous_source: previous.source.clone(),
                    });
                }
            }
        })?;

        info!(
            files = sources.len(),
            warnings = warnings.len(),
            skipped = skipped_rows.len(),
            "validation complete"
        );
        Ok(ValidationReport {
            files_checked: sources.len(),
            warnings,
            skipped_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use liftrec_source::MemoryFeed;

    use super::*;

    const SQUAT: &str = "M|Open|SBD|Wraps|90|S";

    fn check(feed: &MemoryFeed) -> ValidationReport {
        RecordValidator::check(feed, &Keyspace::generate()).unwrap()
    }

    fn non_increasing(report: &ValidationReport) -> Vec<&Warning> {
        report
            .warnings
            .iter()
            .filter(|w| matches!(w, Warning::NonIncreasing { .. }))
            .collect()
    }

    #[test]
    fn empty_root_yields_single_no_sources_warning() {
        let feed = MemoryFeed::new().with("readme.txt", "hello");
        let report = check(&feed);
        assert_eq!(report.files_checked, 0);
        assert_eq!(report.warnings, vec![Warning::NoSources]);
        assert!(!report.is_clean());
    }

    #[test]
    fn lighter_row_in_same_file_is_flagged() {
        let feed = MemoryFeed::new().with(
            "2024.csv",
            format!("{SQUAT},200,Alice\n{SQUAT},190,Bob\n"),
        );
        let report = check(&feed);
        assert_eq!(report.files_checked, 1);
        assert_eq!(
            report.warnings,
            vec![Warning::NonIncreasing {
                key: SQUAT.into(),
                source: "2024.csv".into(),
                row: 2,
                weight: 190.0,
                previous_weight: 200.0,
                previous_source: "2024.csv".into(),
            }]
        );
        assert_eq!(
            report.warnings[0].to_string(),
            "Non-increasing record for 'M|Open|SBD|Wraps|90|S' in 2024.csv:2: \
             190.0 <= 200.0 (last set in 2024.csv)"
        );
    }

    #[test]
    fn raw_squat_key_is_unrecognized_and_still_ledgered() {
        let key = "M|Open|SBD|Raw|90|S";
        let feed = MemoryFeed::new().with("2024.csv", format!("{key},200,Alice\n{key},190,Bob\n"));
        let report = check(&feed);
        let unknown = report
            .warnings
            .iter()
            .filter(|w| matches!(w, Warning::UnrecognizedKey { .. }))
            .count();
        assert_eq!(unknown, 2);
        assert_eq!(non_increasing(&report).len(), 1);
    }

    #[test]
    fn unrecognized_key_precedes_monotonic_finding_for_same_row() {
        let feed = MemoryFeed::new()
            .with("2023.csv", "X|Foo|SBD|Raw|90|S,100,Carol\n")
            .with("2024.csv", "X|Foo|SBD|Raw|90|S,90,Carol\n");
        let report = check(&feed);
        let kinds: Vec<String> = report
            .warnings
            .iter()
            .map(|w| serde_json::to_value(w).unwrap()["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec!["unrecognized_key", "unrecognized_key", "non_increasing"]
        );
        assert_eq!(
            report.warnings[0].to_string(),
            "Unrecognized key 'X|Foo|SBD|Raw|90|S' in 2023.csv:1 (Carol)"
        );
    }

    #[test]
    fn unnamed_unrecognized_row_has_no_suffix() {
        let feed = MemoryFeed::new().with("2024.csv", "nonsense,1\n");
        let report = check(&feed);
        assert_eq!(
            report.warnings[0].to_string(),
            "Unrecognized key 'nonsense' in 2024.csv:1"
        );
    }

    #[test]
    fn ties_are_flagged_across_files() {
        let feed = MemoryFeed::new()
            .with("2023.csv", format!("{SQUAT},200,Alice\n"))
            .with("2023-06-01.csv", format!("{SQUAT},200,Bob\n"));
        let report = check(&feed);
        let flagged = non_increasing(&report);
        assert_eq!(flagged.len(), 1);
        let Warning::NonIncreasing {
            source,
            previous_source,
            ..
        } = flagged[0]
        else {
            unreachable!();
        };
        assert_eq!(source, "2023-06-01.csv");
        assert_eq!(previous_source, "2023.csv");
    }

    #[test]
    fn invalid_weights_are_surfaced_but_not_warnings() {
        let feed = MemoryFeed::new().with(
            "2024.csv",
            format!("{SQUAT},heavy,Alice\n{SQUAT},200,Alice\nshort\n"),
        );
        let report = check(&feed);
        assert!(report.is_clean());
        assert_eq!(
            report.skipped_rows,
            vec![SkippedRow {
                source: "2024.csv".into(),
                row: 1,
                raw_weight: "heavy".into(),
            }]
        );
        assert_eq!(
            report.skipped_rows[0].to_string(),
            "Skipping row with invalid weight in 2024.csv:1: 'heavy'"
        );
    }

    #[test]
    fn nan_weight_cannot_freeze_a_key() {
        let feed = MemoryFeed::new().with(
            "2024.csv",
            format!("{SQUAT},nan,A\n{SQUAT},200,B\n{SQUAT},250,C\n"),
        );
        let report = check(&feed);
        assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings);
        assert_eq!(report.skipped_rows.len(), 1);
        assert_eq!(report.skipped_rows[0].raw_weight, "nan");
    }

    #[test]
    fn clean_history_reports_file_count() {
        let feed = MemoryFeed::new()
            .with("2023.csv", format!("{SQUAT},200,Alice\n"))
            .with("2024.csv", format!("{SQUAT},210,Alice\n"));
        let report = check(&feed);
        assert!(report.is_clean());
        assert_eq!(report.files_checked, 2);
    }
}
