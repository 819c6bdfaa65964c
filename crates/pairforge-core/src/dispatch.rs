//! Bounded-concurrency task dispatch.
//!
//! Tasks fresh in the cache are answered inline without touching the
//! network or a worker slot. Everything else is spawned onto the runtime
//! with a semaphore bounding how many HTTP checks run at once; every worker
//! posts exactly one outcome into a shared channel, transport errors
//! included, so the aggregator's expected total always drains.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn};

use crate::cache::{CacheKey, DiskCache};
use crate::domain::{now_millis, Outcome, ValidationTask};
use crate::exchange::ExchangeSet;
use crate::http_client::{HttpClient, HttpRequest};
use crate::tasks;
use crate::validator::ValidatorMap;

/// Default number of concurrent validation workers.
pub const DEFAULT_WORKERS: usize = 6;

#[derive(Debug, Clone, Copy)]
pub struct DispatchOptions {
    /// Maximum concurrent live HTTP checks.
    pub workers: usize,
    /// Cache freshness threshold in milliseconds.
    pub threshold_ms: u64,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            threshold_ms: 30 * 24 * 60 * 60 * 1000,
        }
    }
}

pub struct Dispatcher {
    http: Arc<dyn HttpClient>,
    validators: ValidatorMap,
    cache: DiskCache,
    options: DispatchOptions,
}

impl Dispatcher {
    pub fn new(
        http: Arc<dyn HttpClient>,
        validators: ValidatorMap,
        cache: DiskCache,
        options: DispatchOptions,
    ) -> Self {
        Self {
            http,
            validators,
            cache,
            options,
        }
    }

    /// Submit every pending task for every exchange in the set.
    ///
    /// Returns the outcome channel and the number of outcomes it will
    /// deliver. Each submitted task yields exactly one outcome; a transport
    /// failure is reported as an unsupported pair rather than dropped, so
    /// the count never decays. Must be called within a tokio runtime.
    pub fn submit(&self, exchanges: &ExchangeSet) -> (mpsc::UnboundedReceiver<Outcome>, usize) {
        let (tx, rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(self.options.workers.max(1)));

        // Round-robin across exchanges so no single API endpoint eats a
        // long contiguous burst of checks.
        let mut queues: Vec<VecDeque<(ValidationTask, String)>> = exchanges
            .iter()
            .map(|exchange| {
                tasks::generate(exchange)
                    .into_iter()
                    .map(|task| {
                        let url = exchange.ticker_url(&task.base, &task.quote);
                        (task, url)
                    })
                    .collect()
            })
            .collect();

        let mut total = 0usize;
        while queues.iter().any(|queue| !queue.is_empty()) {
            for queue in &mut queues {
                let Some((task, url)) = queue.pop_front() else {
                    continue;
                };
                total += 1;

                let key = CacheKey::new(&task.exchange, task.base.clone(), task.quote.clone());
                if let Some(record) = self.cache.lookup(&key, self.options.threshold_ms) {
                    let _ = tx.send(Outcome {
                        exchange: task.exchange,
                        base: task.base,
                        quote: task.quote,
                        success: record.rc,
                        stamp: record.stamp,
                        cached: true,
                    });
                    continue;
                }

                let validator = self.validators.get(&task.exchange);
                let http = Arc::clone(&self.http);
                let semaphore = Arc::clone(&semaphore);
                let tx = tx.clone();

                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    let success = match http.execute(HttpRequest::get(&url)).await {
                        Ok(response) => {
                            let valid = validator(&response);
                            debug!(status = response.status, valid, %url, "ticker checked");
                            valid
                        }
                        Err(error) => {
                            warn!(%url, %error, "transport error, counting pair as unsupported");
                            false
                        }
                    };
                    let _ = tx.send(Outcome {
                        exchange: task.exchange,
                        base: task.base,
                        quote: task.quote,
                        success,
                        stamp: now_millis(),
                        cached: false,
                    });
                });
            }
        }

        (rx, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheRecord;
    use crate::domain::Instrument;
    use crate::exchange::ExchangeDescriptor;
    use crate::http_client::{HttpResponse, StaticHttpClient};

    fn inst(code: &str) -> Instrument {
        Instrument::parse(code).expect("valid instrument")
    }

    fn two_instrument_set() -> ExchangeSet {
        let mut set = ExchangeSet::new();
        set.register(
            ExchangeDescriptor::new("x", "X", "https://x/", "https://x/{base}{quote}")
                .with_instruments(vec![inst("BTC"), inst("EUR")]),
        )
        .expect("register");
        set
    }

    #[tokio::test]
    async fn every_task_yields_exactly_one_outcome() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dispatcher = Dispatcher::new(
            Arc::new(StaticHttpClient::default()),
            ValidatorMap::new(),
            DiskCache::new(dir.path()),
            DispatchOptions::default(),
        );

        let (mut rx, total) = dispatcher.submit(&two_instrument_set());
        assert_eq!(total, 2);

        let mut outcomes = Vec::new();
        for _ in 0..total {
            outcomes.push(rx.recv().await.expect("outcome"));
        }
        assert!(rx.recv().await.is_none());
        assert!(outcomes.iter().all(|o| o.success && !o.cached));
    }

    #[tokio::test]
    async fn fresh_cache_entries_are_served_inline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = DiskCache::new(dir.path());
        let stamp = now_millis();
        cache
            .store(
                &CacheKey::new("x", inst("BTC"), inst("EUR")),
                &CacheRecord::new(true, stamp),
            )
            .expect("store");

        let dispatcher = Dispatcher::new(
            Arc::new(StaticHttpClient::new(HttpResponse::with_status(404, "{}"))),
            ValidatorMap::new(),
            cache,
            DispatchOptions::default(),
        );

        let (mut rx, total) = dispatcher.submit(&two_instrument_set());
        assert_eq!(total, 2);

        let mut cached = Vec::new();
        let mut live = Vec::new();
        for _ in 0..total {
            let outcome = rx.recv().await.expect("outcome");
            if outcome.cached {
                cached.push(outcome);
            } else {
                live.push(outcome);
            }
        }

        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].base, inst("BTC"));
        assert!(cached[0].success);
        assert_eq!(cached[0].stamp, stamp);

        // The live check hit the 404 double and failed.
        assert_eq!(live.len(), 1);
        assert!(!live[0].success);
    }
}
