//! Single-consumer outcome aggregation.
//!
//! The aggregator is the only writer of the confirmed-pairs tables and the
//! counters; workers only ever post outcomes to the channel, so no shared
//! in-memory state needs locking.

use tokio::sync::mpsc;
use tracing::warn;

use crate::cache::{CacheKey, CacheRecord, DiskCache};
use crate::domain::Outcome;
use crate::exchange::ExchangeSet;

/// Per-outcome progress reporting seam. The CLI renders a gauge through
/// this; tests and `--no-gauge` runs plug in [`NoopProgress`].
pub trait ProgressSink {
    fn on_outcome(&mut self, processed: usize, total: usize, outcome: &Outcome);
    fn on_finish(&mut self) {}
}

/// Progress sink that reports nothing.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_outcome(&mut self, _processed: usize, _total: usize, _outcome: &Outcome) {}
}

/// Final accounting for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub confirmed: usize,
    pub rejected: usize,
    pub cache_hits: usize,
}

impl RunSummary {
    pub fn cache_hit_percent(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            (self.cache_hits as f64 * 100.0) / self.processed as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    /// Suppress cache writes (the `--dry-run` mode).
    pub dry_run: bool,
}

impl Aggregator {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Drain exactly `total` outcomes from the channel, applying each to
    /// the owning exchange's confirmed-pairs table and persisting live
    /// verdicts. Ends precisely when `processed == total`.
    pub async fn drain(
        &self,
        rx: &mut mpsc::UnboundedReceiver<Outcome>,
        total: usize,
        exchanges: &mut ExchangeSet,
        cache: &DiskCache,
        progress: &mut dyn ProgressSink,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        while summary.processed < total {
            let Some(outcome) = rx.recv().await else {
                // Channel closed early; with every worker posting exactly
                // one outcome this only happens if a worker was torn down.
                warn!(
                    processed = summary.processed,
                    total, "outcome channel closed before all tasks reported"
                );
                break;
            };

            if outcome.success {
                match exchanges.get_mut(&outcome.exchange) {
                    Some(exchange) => {
                        exchange
                            .pairs
                            .insert(outcome.base.clone(), outcome.quote.clone());
                    }
                    None => warn!(exchange = %outcome.exchange, "outcome for unknown exchange"),
                }
                summary.confirmed += 1;
            } else {
                summary.rejected += 1;
            }

            if outcome.cached {
                summary.cache_hits += 1;
            } else if !self.dry_run {
                let key = CacheKey::new(
                    &outcome.exchange,
                    outcome.base.clone(),
                    outcome.quote.clone(),
                );
                let record = CacheRecord::new(outcome.success, outcome.stamp);
                if let Err(error) = cache.store(&key, &record) {
                    warn!(exchange = %outcome.exchange, %error, "failed to persist verdict");
                }
            }

            summary.processed += 1;
            progress.on_outcome(summary.processed, total, &outcome);
        }

        progress.on_finish();
        summary
    }
}
