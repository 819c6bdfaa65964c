//! On-disk verdict cache.
//!
//! One plain-text JSON file per checked pair, laid out as
//! `<root>/<exchange_id>/<BASE>-<QUOTE>` with the shape
//! `{"rc": <bool>, "stamp": <epoch millis>}`. The stamp is always the time
//! of the live check that produced the verdict, never the time of a read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{now_millis, Instrument};

/// Key addressing one cached verdict.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub exchange: String,
    pub base: Instrument,
    pub quote: Instrument,
}

impl CacheKey {
    pub fn new(exchange: impl Into<String>, base: Instrument, quote: Instrument) -> Self {
        Self {
            exchange: exchange.into(),
            base,
            quote,
        }
    }

    fn file_name(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }
}

/// Persisted verdict record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub rc: bool,
    pub stamp: u64,
}

impl CacheRecord {
    pub fn new(rc: bool, stamp: u64) -> Self {
        Self { rc, stamp }
    }
}

/// Disk-backed verdict cache. A disabled cache answers every lookup with a
/// miss and drops every store, so callers never branch on cache usage.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
    enabled: bool,
}

impl DiskCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            enabled: true,
        }
    }

    /// Cache that never reads or writes (the `--no-cache` mode).
    pub fn disabled(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            enabled: false,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(&key.exchange).join(key.file_name())
    }

    /// Return the persisted record for `key` when it is younger than
    /// `threshold_ms`. A missing, unreadable or corrupt file and a stale
    /// record all behave identically as a miss.
    pub fn lookup(&self, key: &CacheKey, threshold_ms: u64) -> Option<CacheRecord> {
        if !self.enabled {
            return None;
        }

        let raw = fs::read_to_string(self.record_path(key)).ok()?;
        let record: CacheRecord = serde_json::from_str(&raw).ok()?;
        if now_millis() < record.stamp.saturating_add(threshold_ms) {
            Some(record)
        } else {
            None
        }
    }

    /// Persist a verdict, overwriting any prior record for the same key.
    pub fn store(&self, key: &CacheKey, record: &CacheRecord) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.record_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, body)
    }
}
