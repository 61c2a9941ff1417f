//! Lazy parsing of one source's rows into attempts.
//!
//! Row schema (no header): `key, weight, lifter[, _, location]`. Column 3
//! is present in real data but carries nothing the ledger uses.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use liftrec_types::{Attempt, RowOutcome, SkipReason};

use crate::error::Result;

const KEY_COLUMN: usize = 0;
const WEIGHT_COLUMN: usize = 1;
const LIFTER_COLUMN: usize = 2;
const LOCATION_COLUMN: usize = 4;

/// What a caller needs from each row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadMode {
    /// Record checking: key and weight suffice; the lifter is optional.
    Check,
    /// Year-end reporting: every counted row must name its lifter.
    Report,
}

impl ReadMode {
    /// Minimum number of columns a row must have to yield an attempt.
    pub fn required_columns(self) -> usize {
        match self {
            Self::Check => 2,
            Self::Report => 3,
        }
    }

    /// Whether a row with a blank key is dropped. Reports still count it.
    pub fn requires_key(self) -> bool {
        matches!(self, Self::Check)
    }
}

/// Iterator over the rows of one source, in row order.
///
/// Finite and not restartable. Each item is either a parsed attempt or
/// the reason a row was skipped; only unreadable input is an `Err`.
pub struct AttemptReader<R: Read> {
    source: String,
    mode: ReadMode,
    records: StringRecordsIntoIter<R>,
    fallback_row: u64,
}

impl<R: Read> AttemptReader<R> {
    pub fn new(source: impl Into<String>, input: R, mode: ReadMode) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(input)
            .into_records();
        Self {
            source: source.into(),
            mode,
            records,
            fallback_row: 0,
        }
    }

    /// Name of the source being read.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> ReadMode {
        self.mode
    }

    fn classify(&self, row: u64, record: &StringRecord) -> RowOutcome {
        let required = self.mode.required_columns();
        if record.is_empty() {
            return RowOutcome::Skipped {
                row,
                reason: SkipReason::Empty,
            };
        }
        if record.len() < required {
            return RowOutcome::Skipped {
                row,
                reason: SkipReason::TooFewColumns {
                    found: record.len(),
                    required,
                },
            };
        }

        let field = |index: usize| record.get(index).map(str::trim).unwrap_or_default();

        let key = field(KEY_COLUMN);
        if key.is_empty() && self.mode.requires_key() {
            return RowOutcome::Skipped {
                row,
                reason: SkipReason::MissingKey,
            };
        }

        let raw_weight = record.get(WEIGHT_COLUMN).unwrap_or_default();
        let parsed = raw_weight.trim().parse::<f64>().ok();
        let Some(weight) = parsed.filter(|weight| weight.is_finite()) else {
            return RowOutcome::Skipped {
                row,
                reason: SkipReason::InvalidWeight(raw_weight.to_string()),
            };
        };

        RowOutcome::Attempt(Attempt {
            row,
            key: key.to_string(),
            weight,
            lifter: field(LIFTER_COLUMN).to_string(),
            location: field(LOCATION_COLUMN).to_string(),
        })
    }
}

impl<R: Read> Iterator for AttemptReader<R> {
    type Item = Result<RowOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err.into())),
        };
        self.fallback_row += 1;
        let row = record
            .position()
            .map_or(self.fallback_row, |position| position.line());

        let outcome = self.classify(row, &record);
        if let RowOutcome::Skipped { row, reason } = &outcome {
            debug!(source = %self.source, row, %reason, "skipped row");
        }
        Some(Ok(outcome))
    }
}
