use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use liftrec_source::{ReadMode, SourceFeed, SourceMeta};
use liftrec_types::{Attempt, Division};

use crate::error::LedgerError;
use crate::records::{Classification, ImprovementEvent};
use crate::replay::{ReplayEngine, ReplayStep};

/// Label → occurrence count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<String, u64>,
}

impl Tally {
    pub fn add(&mut self, label: &str) {
        *self.counts.entry(label.to_string()).or_default() += 1;
    }

    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or_default()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent labels; count descending, then label ascending.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// An improvement ranked by relative gain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PercentGlowUp<'a> {
    pub event: &'a ImprovementEvent,
    pub percent: f64,
}

/// Year-end aggregates for one target year.
///
/// Only new bests set in files of `year` are counted, but the ledger they
/// are judged against is built from every file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WrappedReport {
    pub year: i32,
    /// New records plus improvements.
    pub total_broken: u64,
    /// First-ever entries for a key.
    pub new_records: u64,
    /// Sum of improvement deltas, in kg.
    pub total_kg_added: f64,
    pub locations: Tally,
    pub lifters: Tally,
    pub tested_lifters: Tally,
    pub untested_lifters: Tally,
    /// Improvements in file order.
    pub glow_ups: Vec<ImprovementEvent>,
}

impl WrappedReport {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            total_broken: 0,
            new_records: 0,
            total_kg_added: 0.0,
            locations: Tally::default(),
            lifters: Tally::default(),
            tested_lifters: Tally::default(),
            untested_lifters: Tally::default(),
            glow_ups: Vec::new(),
        }
    }

    /// Fold one classified attempt into the aggregates.
    ///
    /// Attempts outside the target year and attempts that did not set a
    /// new best are ignored.
    pub fn record(&mut self, attempt: &Attempt, source: &SourceMeta, classification: &Classification) {
        if source.date.year != self.year || !classification.is_new_best() {
            return;
        }

        self.total_broken += 1;
        self.locations.add(&attempt.location);
        self.lifters.add(&attempt.lifter);
        if Division::of_key(&attempt.key).is_some_and(|division| division.tested) {
            self.tested_lifters.add(&attempt.lifter);
        } else {
            self.untested_lifters.add(&attempt.lifter);
        }

        match classification {
            Classification::NewRecord => self.new_records += 1,
            Classification::Improvement(event) => {
                self.total_kg_added += event.delta;
                self.glow_ups.push(event.clone());
            }
            Classification::NotImproved { .. } => {}
        }
    }

    /// Largest absolute improvements.
    pub fn biggest_glow_ups(&self, n: usize) -> Vec<&ImprovementEvent> {
        rank_by(self.glow_ups.iter(), n, |e| e.delta)
    }

    /// Largest absolute improvements in the Open division, tested or not.
    pub fn open_glow_ups(&self, n: usize) -> Vec<&ImprovementEvent> {
        rank_by(self.open_events(), n, |e| e.delta)
    }

    /// Largest relative improvements. Events with a non-positive previous
    /// weight are left out.
    pub fn percentage_glow_ups(&self, n: usize) -> Vec<PercentGlowUp<'_>> {
        rank_percent(self.glow_ups.iter(), n)
    }

    pub fn open_percentage_glow_ups(&self, n: usize) -> Vec<PercentGlowUp<'_>> {
        rank_percent(self.open_events(), n)
    }

    /// Longest-standing records that fell this year.
    ///
    /// Ranked on days between date anchors so day-precision and year-only
    /// origins compare in one unit.
    pub fn oldest_records_broken(&self, n: usize) -> Vec<&ImprovementEvent> {
        let mut ranked: Vec<(i64, &ImprovementEvent)> =
            self.glow_ups.iter().map(|e| (e.age_days(), e)).collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| tie_break(a.1, b.1)));
        ranked.into_iter().take(n).map(|(_, e)| e).collect()
    }

    /// Per-lifter sum of improvement deltas; total descending, then name.
    pub fn kg_added_leaderboard(&self, n: usize) -> Vec<(&str, f64)> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for event in &self.glow_ups {
            *totals.entry(event.lifter.as_str()).or_default() += event.delta;
        }
        let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Distinct lifter names with at least one counted record.
    pub fn distinct_lifters(&self) -> usize {
        self.lifters.len()
    }

    fn open_events(&self) -> impl Iterator<Item = &ImprovementEvent> {
        self.glow_ups.iter().filter(|e| e.is_open_division())
    }
}

/// Descending new weight, then descending lifter name.
fn tie_break(a: &ImprovementEvent, b: &ImprovementEvent) -> Ordering {
    b.new_weight
        .total_cmp(&a.new_weight)
        .then_with(|| b.lifter.cmp(&a.lifter))
}

fn rank_by<'a>(
    events: impl Iterator<Item = &'a ImprovementEvent>,
    n: usize,
    score: impl Fn(&ImprovementEvent) -> f64,
) -> Vec<&'a ImprovementEvent> {
    let mut ranked: Vec<(f64, &ImprovementEvent)> = events.map(|e| (score(e), e)).collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| tie_break(a.1, b.1)));
    ranked.into_iter().take(n).map(|(_, e)| e).collect()
}

fn rank_percent<'a>(
    events: impl Iterator<Item = &'a ImprovementEvent>,
    n: usize,
) -> Vec<PercentGlowUp<'a>> {
    let mut ranked: Vec<PercentGlowUp<'a>> = events
        .filter_map(|event| {
            event
                .percent()
                .map(|percent| PercentGlowUp { event, percent })
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then_with(|| tie_break(a.event, b.event))
    });
    ranked.truncate(n);
    ranked
}

/// Builds a [`WrappedReport`] from a full replay.
pub struct WrappedBuilder;

impl WrappedBuilder {
    pub fn build<F: SourceFeed + ?Sized>(feed: &F, year: i32) -> Result<WrappedReport, LedgerError> {
        let mut report = WrappedReport::empty(year);
        let result = ReplayEngine::replay(feed, ReadMode::Report, |step| {
            if let ReplayStep::Classified {
                source,
                attempt,
                classification,
            } = step
            {
                report.record(attempt, source, classification);
            }
        })?;

        debug!(
            year,
            sources = result.summary.sources,
            broken = report.total_broken,
            glow_ups = report.glow_ups.len(),
            "built wrapped report"
        );
        Ok(report)
    }
}
