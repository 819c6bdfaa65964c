//! Per-exchange ticker response validation.
//!
//! Each exchange answers its public ticker endpoint with a different JSON
//! shape; a validator is a pure predicate deciding whether the response
//! describes a real tradable pair. Unexpected shapes are a plain "pair not
//! supported", never an error.

use std::collections::HashMap;

use serde_json::Value;

use crate::http_client::HttpResponse;

/// Pure per-exchange verdict function.
pub type Validator = fn(&HttpResponse) -> bool;

/// Validators keyed by exchange id. Exchanges without a registered entry
/// fall back to the status-only check.
#[derive(Debug, Clone)]
pub struct ValidatorMap {
    map: HashMap<String, Validator>,
}

impl ValidatorMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Validators for the built-in exchange registry.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.register("binance-com", binance_ticker);
        set.register("bitstamp-net", status_ok);
        set.register("bitbay-net", zonda_ticker);
        set.register("coinmate-io", coinmate_ticker);
        set.register("kraken-com", kraken_ticker);
        set
    }

    pub fn register(&mut self, exchange: impl Into<String>, validator: Validator) {
        self.map.insert(exchange.into(), validator);
    }

    pub fn get(&self, exchange: &str) -> Validator {
        self.map.get(exchange).copied().unwrap_or(status_ok)
    }
}

impl Default for ValidatorMap {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Baseline check: any 2xx response counts as a listed pair.
pub fn status_ok(response: &HttpResponse) -> bool {
    response.is_success()
}

fn parse_object(response: &HttpResponse) -> Option<Value> {
    if !response.is_success() {
        return None;
    }
    serde_json::from_str(&response.body).ok()
}

fn has_fields(value: &Value, fields: &[&str]) -> bool {
    fields.iter().all(|field| value.get(field).is_some())
}

/// Binance `ticker/price`: `{"symbol": "...", "price": "..."}`.
pub fn binance_ticker(response: &HttpResponse) -> bool {
    match parse_object(response) {
        Some(value) => has_fields(&value, &["symbol", "price"]),
        None => false,
    }
}

/// Zonda (BitBay) trading ticker: top-level min/max/last/bid/ask fields.
pub fn zonda_ticker(response: &HttpResponse) -> bool {
    match parse_object(response) {
        Some(value) => has_fields(&value, &["min", "max", "last", "bid", "ask"]),
        None => false,
    }
}

/// Coinmate ticker: no error flag, data object with ask/bid/change/last.
pub fn coinmate_ticker(response: &HttpResponse) -> bool {
    let Some(value) = parse_object(response) else {
        return false;
    };
    if value.get("error").and_then(Value::as_bool).unwrap_or(false) {
        return false;
    }
    match value.get("data") {
        Some(data) => has_fields(data, &["ask", "bid", "change", "last"]),
        None => false,
    }
}

/// Kraken public ticker: empty error array and a result object whose first
/// entry carries the a/b/c/l quote arrays. The result key is the exchange's
/// own asset-pair spelling, so only the first entry is inspected.
pub fn kraken_ticker(response: &HttpResponse) -> bool {
    let Some(value) = parse_object(response) else {
        return false;
    };
    if let Some(errors) = value.get("error").and_then(Value::as_array) {
        if !errors.is_empty() {
            return false;
        }
    }
    let Some(result) = value.get("result").and_then(Value::as_object) else {
        return false;
    };
    match result.values().next() {
        Some(entry) => has_fields(entry, &["a", "b", "c", "l"]),
        None => false,
    }
}
