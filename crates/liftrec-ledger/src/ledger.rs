use std::collections::HashMap;

use liftrec_source::SourceMeta;
use liftrec_types::Attempt;

use crate::records::{Classification, ImprovementEvent, LedgerEntry};

/// Per-key table of current best lifts.
///
/// Entries are created on the first attempt for a key, replaced only by a
/// strictly heavier attempt, and never removed. A tie leaves the entry alone.
#[derive(Clone, Debug, Default)]
pub struct RecordLedger {
    entries: HashMap<String, LedgerEntry>,
}

impl RecordLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one attempt from `source` and classify it.
    pub fn apply(&mut self, attempt: &Attempt, source: &SourceMeta) -> Classification {
        let replacement = LedgerEntry {
            weight: attempt.weight,
            achieved: source.date,
            source: source.name.clone(),
            lifter: attempt.lifter.clone(),
        };

        let Some(entry) = self.entries.get_mut(&attempt.key) else {
            self.entries.insert(attempt.key.clone(), replacement);
            return Classification::NewRecord;
        };

        if attempt.weight > entry.weight {
            let event = ImprovementEvent {
                lifter: attempt.lifter.clone(),
                key: attempt.key.clone(),
                location: attempt.location.clone(),
                previous_weight: entry.weight,
                new_weight: attempt.weight,
                delta: attempt.weight - entry.weight,
                previous_date: entry.achieved,
                current_date: source.date,
                previous_source: entry.source.clone(),
                source: source.name.clone(),
            };
            *entry = replacement;
            Classification::Improvement(event)
        } else {
            Classification::NotImproved {
                previous: entry.clone(),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&LedgerEntry> {
        self.entries.get(key)
    }

    /// Current best weight for `key`.
    pub fn best(&self, key: &str) -> Option<f64> {
        self.entries.get(key).map(|entry| entry.weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key.
    pub fn entries(&self) -> Vec<(&str, &LedgerEntry)> {
        let mut entries: Vec<(&str, &LedgerEntry)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
