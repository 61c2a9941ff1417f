use serde::{Deserialize, Serialize};

use liftrec_types::{Division, RecordAge, SourceDate};

/// Current best lift for one classification key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub weight: f64,
    /// Position of the source that set it.
    pub achieved: SourceDate,
    /// File name of the source that set it.
    pub source: String,
    pub lifter: String,
}

impl LedgerEntry {
    /// Whether the setting source named an explicit month and day.
    pub fn has_day_precision(&self) -> bool {
        self.achieved.has_day_precision()
    }
}

/// A new best that displaced an existing entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImprovementEvent {
    pub lifter: String,
    pub key: String,
    pub location: String,
    pub previous_weight: f64,
    pub new_weight: f64,
    /// `new_weight - previous_weight`; always positive.
    pub delta: f64,
    pub previous_date: SourceDate,
    pub current_date: SourceDate,
    pub previous_source: String,
    pub source: String,
}

impl ImprovementEvent {
    pub fn previous_has_day_precision(&self) -> bool {
        self.previous_date.has_day_precision()
    }

    /// Displayed age of the displaced record.
    pub fn age(&self) -> RecordAge {
        self.previous_date.age_until(&self.current_date)
    }

    /// Age in days between the two date anchors, whatever the precision.
    pub fn age_days(&self) -> i64 {
        self.previous_date.days_until(&self.current_date)
    }

    /// Improvement relative to the previous weight, in percent.
    ///
    /// `None` when the previous weight is zero or negative.
    pub fn percent(&self) -> Option<f64> {
        (self.previous_weight > 0.0).then(|| self.delta / self.previous_weight * 100.0)
    }

    pub fn is_open_division(&self) -> bool {
        Division::of_key(&self.key).is_some_and(|division| division.is_open())
    }
}

/// How one attempt related to the ledger when it was applied.
///
/// Exactly one variant applies to every attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    /// First attempt ever seen for the key.
    NewRecord,
    /// Strictly beat the existing entry.
    Improvement(ImprovementEvent),
    /// Tied or fell short; the ledger is unchanged.
    NotImproved { previous: LedgerEntry },
}

impl Classification {
    /// `true` for the two variants that replace the ledger entry.
    pub fn is_new_best(&self) -> bool {
        !matches!(self, Self::NotImproved { .. })
    }
}
