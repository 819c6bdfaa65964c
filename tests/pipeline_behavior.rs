//! Behavior tests for the validate-and-cache pipeline.
//!
//! These run the dispatcher and aggregator end to end against scripted
//! HTTP transports, verifying outcome accounting, the cache contract and
//! the transport-error path without any network access.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pairforge_core::{
    Aggregator, CacheKey, CacheRecord, DiskCache, DispatchOptions, Dispatcher, ExchangeDescriptor,
    ExchangeSet, HttpClient, HttpError, HttpRequest, HttpResponse, Instrument, NoopProgress,
    RunSummary, ValidatorMap,
};

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Transport double: answers from a URL-keyed script, counts every call,
/// and can simulate a transport-level failure for every request.
struct ScriptedHttpClient {
    responses: HashMap<String, HttpResponse>,
    fail_all: bool,
    hits: AtomicUsize,
}

impl ScriptedHttpClient {
    fn new(responses: HashMap<String, HttpResponse>) -> Self {
        Self {
            responses,
            fail_all: false,
            hits: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            responses: HashMap::new(),
            fail_all: true,
            hits: AtomicUsize::new(0),
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_all {
            Err(HttpError::new("connection refused"))
        } else {
            Ok(self
                .responses
                .get(&request.url)
                .cloned()
                .unwrap_or_else(|| HttpResponse::with_status(404, "{}")))
        };
        Box::pin(async move { result })
    }
}

fn inst(code: &str) -> Instrument {
    Instrument::parse(code).expect("valid instrument")
}

fn exchange_x() -> ExchangeSet {
    let mut set = ExchangeSet::new();
    set.register(
        ExchangeDescriptor::new("x", "X", "https://x.test/", "https://x.test/{base}{quote}")
            .with_instruments(vec![inst("BTC"), inst("EUR")]),
    )
    .expect("register");
    set
}

async fn run_pipeline(
    client: Arc<dyn HttpClient>,
    cache: DiskCache,
    exchanges: &mut ExchangeSet,
    threshold_ms: u64,
    dry_run: bool,
) -> RunSummary {
    let dispatcher = Dispatcher::new(
        client,
        ValidatorMap::new(),
        cache.clone(),
        DispatchOptions {
            workers: 6,
            threshold_ms,
        },
    );
    let (mut rx, total) = dispatcher.submit(exchanges);
    Aggregator::new(dry_run)
        .drain(&mut rx, total, exchanges, &cache, &mut NoopProgress)
        .await
}

#[tokio::test]
async fn mixed_verdicts_populate_only_confirmed_pairs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = Arc::new(ScriptedHttpClient::new(HashMap::from([(
        String::from("https://x.test/BTCEUR"),
        HttpResponse::ok_json("{}"),
    )])));
    let mut exchanges = exchange_x();

    let summary = run_pipeline(
        Arc::clone(&client) as Arc<dyn HttpClient>,
        DiskCache::new(dir.path()),
        &mut exchanges,
        30 * DAY_MS,
        false,
    )
    .await;

    // Exactly (BTC,EUR) and (EUR,BTC) were generated and checked live.
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.confirmed, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.cache_hits, 0);
    assert_eq!(client.hits(), 2);

    let table = &exchanges.get("x").expect("exchange").pairs;
    assert!(table.contains(&inst("BTC"), &inst("EUR")));
    assert!(!table.contains(&inst("EUR"), &inst("BTC")));
    assert_eq!(table.len(), 1);
}

#[tokio::test]
async fn second_run_is_served_entirely_from_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    let responses = HashMap::from([(
        String::from("https://x.test/BTCEUR"),
        HttpResponse::ok_json("{}"),
    )]);

    let first = Arc::new(ScriptedHttpClient::new(responses.clone()));
    let mut exchanges = exchange_x();
    run_pipeline(
        Arc::clone(&first) as Arc<dyn HttpClient>,
        DiskCache::new(dir.path()),
        &mut exchanges,
        30 * DAY_MS,
        false,
    )
    .await;
    assert_eq!(first.hits(), 2);

    // Fresh registry, same cache root: zero network calls, cached verdicts.
    let second = Arc::new(ScriptedHttpClient::new(responses));
    let mut exchanges = exchange_x();
    let summary = run_pipeline(
        Arc::clone(&second) as Arc<dyn HttpClient>,
        DiskCache::new(dir.path()),
        &mut exchanges,
        30 * DAY_MS,
        false,
    )
    .await;

    assert_eq!(second.hits(), 0);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.cache_hits, 2);
    assert_eq!(summary.confirmed, 1);
    let table = &exchanges.get("x").expect("exchange").pairs;
    assert!(table.contains(&inst("BTC"), &inst("EUR")));
}

#[tokio::test]
async fn cached_verdict_preserves_original_success_and_stamp() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DiskCache::new(dir.path());
    let stamp = pairforge_core::now_millis() - DAY_MS;
    cache
        .store(
            &CacheKey::new("x", inst("BTC"), inst("EUR")),
            &CacheRecord::new(true, stamp),
        )
        .expect("store");

    let dispatcher = Dispatcher::new(
        Arc::new(ScriptedHttpClient::failing()),
        ValidatorMap::new(),
        cache,
        DispatchOptions {
            workers: 6,
            threshold_ms: 30 * DAY_MS,
        },
    );
    let (mut rx, total) = dispatcher.submit(&exchange_x());
    assert_eq!(total, 2);

    let mut cached = None;
    for _ in 0..total {
        let outcome = rx.recv().await.expect("outcome");
        if outcome.cached {
            cached = Some(outcome);
        }
    }

    let cached = cached.expect("one cached outcome");
    assert!(cached.success);
    assert_eq!(cached.stamp, stamp);
}

#[tokio::test]
async fn transport_errors_count_as_failures_and_never_hang() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = Arc::new(ScriptedHttpClient::failing());
    let mut exchanges = exchange_x();

    let drained = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        run_pipeline(
            Arc::clone(&client) as Arc<dyn HttpClient>,
            DiskCache::new(dir.path()),
            &mut exchanges,
            30 * DAY_MS,
            false,
        ),
    )
    .await;

    let summary = drained.expect("aggregator must not hang on transport errors");
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.confirmed, 0);
    assert_eq!(summary.rejected, 2);
    assert!(exchanges.get("x").expect("exchange").pairs.is_empty());
}

#[tokio::test]
async fn dry_run_checks_live_but_persists_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = Arc::new(ScriptedHttpClient::new(HashMap::new()));
    let mut exchanges = exchange_x();

    let summary = run_pipeline(
        Arc::clone(&client) as Arc<dyn HttpClient>,
        DiskCache::new(dir.path()),
        &mut exchanges,
        30 * DAY_MS,
        true,
    )
    .await;

    assert_eq!(summary.processed, 2);
    assert_eq!(client.hits(), 2);
    assert!(!dir.path().join("x").exists());
}

#[tokio::test]
async fn summary_accounting_always_balances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DiskCache::new(dir.path());
    cache
        .store(
            &CacheKey::new("x", inst("BTC"), inst("EUR")),
            &CacheRecord::new(false, pairforge_core::now_millis()),
        )
        .expect("store");

    let client = Arc::new(ScriptedHttpClient::new(HashMap::from([(
        String::from("https://x.test/EURBTC"),
        HttpResponse::ok_json("{}"),
    )])));
    let mut exchanges = exchange_x();
    let summary = run_pipeline(
        Arc::clone(&client) as Arc<dyn HttpClient>,
        cache,
        &mut exchanges,
        30 * DAY_MS,
        false,
    )
    .await;

    assert_eq!(summary.confirmed + summary.rejected, summary.processed);
    assert!(summary.cache_hits <= summary.processed);
    assert_eq!(summary.cache_hits, 1);
    assert_eq!(client.hits(), 1);
}
