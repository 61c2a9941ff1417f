use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use liftrec_source::{ReadMode, SourceFeed, SourceMeta};
use liftrec_types::{Attempt, RowOutcome, SkipReason};

use crate::error::LedgerError;
use crate::ledger::RecordLedger;
use crate::records::Classification;

/// One observed row during replay, handed to the visitor in
/// (source, row) order.
#[derive(Clone, Copy, Debug)]
pub enum ReplayStep<'a> {
    Skipped {
        source: &'a SourceMeta,
        row: u64,
        reason: &'a SkipReason,
    },
    Classified {
        source: &'a SourceMeta,
        attempt: &'a Attempt,
        classification: &'a Classification,
    },
}

impl ReplayStep<'_> {
    pub fn source(&self) -> &SourceMeta {
        match self {
            Self::Skipped { source, .. } | Self::Classified { source, .. } => source,
        }
    }
}

/// Counters for one full replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub sources: usize,
    pub attempts: u64,
    pub skipped: u64,
    /// Distinct keys in the ledger at the end of the run.
    pub keys: usize,
}

/// Final ledger state plus run counters.
#[derive(Clone, Debug)]
pub struct ReplayResult {
    pub ledger: RecordLedger,
    pub summary: ReplaySummary,
}

/// Drives a fresh ledger over every source of a feed.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Replay all sources of `feed` in chronological order.
    pub fn replay<F, V>(feed: &F, mode: ReadMode, visit: V) -> Result<ReplayResult, LedgerError>
    where
        F: SourceFeed + ?Sized,
        V: FnMut(ReplayStep<'_>),
    {
        let sources = feed.sources()?;
        Self::replay_sources(feed, &sources, mode, visit)
    }

    /// Replay an already sequenced list of sources.
    ///
    /// The caller is responsible for `sources` being in replay order.
    /// An I/O failure aborts the run and the partial ledger is dropped.
    pub fn replay_sources<F, V>(
        feed: &F,
        sources: &[SourceMeta],
        mode: ReadMode,
        mut visit: V,
    ) -> Result<ReplayResult, LedgerError>
    where
        F: SourceFeed + ?Sized,
        V: FnMut(ReplayStep<'_>),
    {
        let mut ledger = RecordLedger::new();
        let mut summary = ReplaySummary {
            sources: sources.len(),
            ..ReplaySummary::default()
        };

        for source in sources {
            let mut attempts = 0u64;
            for outcome in feed.open(source, mode)? {
                match outcome? {
                    RowOutcome::Attempt(attempt) => {
                        let classification = ledger.apply(&attempt, source);
                        attempts += 1;
                        visit(ReplayStep::Classified {
                            source,
                            attempt: &attempt,
                            classification: &classification,
                        });
                    }
                    RowOutcome::Skipped { row, reason } => {
                        summary.skipped += 1;
                        visit(ReplayStep::Skipped {
                            source,
                            row,
                            reason: &reason,
                        });
                    }
                }
            }
            summary.attempts += attempts;
            debug!(source = %source, attempts, "replayed source");
        }

        summary.keys = ledger.len();
        info!(
            sources = summary.sources,
            attempts = summary.attempts,
            skipped = summary.skipped,
            keys = summary.keys,
            "replay complete"
        );
        Ok(ReplayResult { ledger, summary })
    }
}
