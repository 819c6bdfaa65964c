//! # Pairforge Core
//!
//! Library behind the `pairforge` data generation tool: it validates which
//! currency pairs each supported exchange actually trades, caches the
//! verdicts on disk, and renders the data file consumed by the tracker
//! widget.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   tasks    ┌──────────────┐  outcomes  ┌─────────────┐
//! │ TaskGen      │──────────▶│ Dispatcher    │──────────▶│ Aggregator   │
//! │ (cross prod) │            │ (semaphore +  │  channel   │ (counters +  │
//! └──────────────┘            │  HTTP fanout) │            │  pair table) │
//!                             └──────┬───────┘            └──────┬──────┘
//!                                    │ miss/store                │
//!                             ┌──────▼───────┐            ┌──────▼──────┐
//!                             │ DiskCache    │            │ codegen      │
//!                             └──────────────┘            └─────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregate`] | Single-consumer outcome aggregation and run summary |
//! | [`cache`] | On-disk verdict cache |
//! | [`codegen`] | Generated widget data file rendering |
//! | [`currencies`] | Static currency/token table |
//! | [`dispatch`] | Bounded-concurrency task dispatch |
//! | [`domain`] | Instruments, pairs, tasks, outcomes |
//! | [`error`] | Core error types |
//! | [`exchange`] | Exchange descriptors and the run registry |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`tasks`] | Validation task generation |
//! | [`threshold`] | Freshness threshold parsing |
//! | [`validator`] | Per-exchange ticker response validators |

pub mod aggregate;
pub mod cache;
pub mod codegen;
pub mod currencies;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod http_client;
pub mod tasks;
pub mod threshold;
pub mod validator;

pub use aggregate::{Aggregator, NoopProgress, ProgressSink, RunSummary};
pub use cache::{CacheKey, CacheRecord, DiskCache};
pub use currencies::{Currency, CURRENCIES};
pub use dispatch::{DispatchOptions, Dispatcher, DEFAULT_WORKERS};
pub use domain::{now_millis, Instrument, Outcome, Pair, PairTable, ValidationTask};
pub use error::{CoreError, ValidationError};
pub use exchange::{ExchangeDescriptor, ExchangeSet};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};
pub use threshold::{parse_threshold_ms, DEFAULT_THRESHOLD};
pub use validator::{Validator, ValidatorMap};
