use std::fmt;

use serde::{Deserialize, Serialize};

/// One well-formed result row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// 1-based line number inside the source file.
    pub row: u64,
    /// Raw classification key string, trimmed. May be unrecognized.
    pub key: String,
    /// Lifted weight in kilograms.
    pub weight: f64,
    pub lifter: String,
    /// Meet location; empty when the row does not carry one.
    pub location: String,
}

/// Why a row produced no [`Attempt`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Empty,
    TooFewColumns { found: usize, required: usize },
    MissingKey,
    InvalidWeight(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty row"),
            Self::TooFewColumns { found, required } => {
                write!(f, "{found} column(s), need {required}")
            }
            Self::MissingKey => write!(f, "missing classification key"),
            Self::InvalidWeight(raw) => write!(f, "invalid weight {raw:?}"),
        }
    }
}

/// Tagged result of reading one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOutcome {
    Attempt(Attempt),
    Skipped { row: u64, reason: SkipReason },
}

impl RowOutcome {
    pub fn row(&self) -> u64 {
        match self {
            Self::Attempt(attempt) => attempt.row,
            Self::Skipped { row, .. } => *row,
        }
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        match self {
            Self::Attempt(attempt) => Some(attempt),
            Self::Skipped { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_display() {
        assert_eq!(
            SkipReason::InvalidWeight("abc".into()).to_string(),
            "invalid weight \"abc\""
        );
        assert_eq!(
            SkipReason::TooFewColumns { found: 1, required: 2 }.to_string(),
            "1 column(s), need 2"
        );
    }

    #[test]
    fn outcome_serializes_tagged() {
        let skipped = RowOutcome::Skipped {
            row: 4,
            reason: SkipReason::MissingKey,
        };
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["skipped"]["row"], 4);
        assert_eq!(skipped.row(), 4);
        assert!(skipped.attempt().is_none());
    }
}
