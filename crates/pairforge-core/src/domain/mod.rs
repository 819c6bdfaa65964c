//! Domain types for the pair validation pipeline.

mod instrument;

pub use instrument::Instrument;

use crate::ValidationError;

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> u64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    (nanos / 1_000_000) as u64
}

/// Ordered (base, quote) combination of two distinct instruments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    pub base: Instrument,
    pub quote: Instrument,
}

impl Pair {
    pub fn new(base: Instrument, quote: Instrument) -> Result<Self, ValidationError> {
        if base == quote {
            return Err(ValidationError::SelfPair {
                code: base.as_str().to_string(),
            });
        }
        Ok(Self { base, quote })
    }

    /// Concatenated "BASEQUOTE" form used by exchange allow-lists.
    pub fn concat(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

/// Confirmed-pairs table for one exchange: base instrument mapped to the
/// quotes confirmed tradable against it. Insertion order of bases is kept
/// so generated output stays stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairTable {
    entries: Vec<(Instrument, Vec<Instrument>)>,
}

impl PairTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert; returns true when the pair was newly added.
    pub fn insert(&mut self, base: Instrument, quote: Instrument) -> bool {
        match self.entries.iter_mut().find(|(b, _)| *b == base) {
            Some((_, quotes)) => {
                if quotes.contains(&quote) {
                    false
                } else {
                    quotes.push(quote);
                    true
                }
            }
            None => {
                self.entries.push((base, vec![quote]));
                true
            }
        }
    }

    pub fn contains(&self, base: &Instrument, quote: &Instrument) -> bool {
        self.entries
            .iter()
            .any(|(b, quotes)| b == base && quotes.contains(quote))
    }

    /// Total number of confirmed pairs.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, quotes)| quotes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bases in insertion order with their confirmed quotes.
    pub fn iter(&self) -> impl Iterator<Item = (&Instrument, &[Instrument])> {
        self.entries
            .iter()
            .map(|(base, quotes)| (base, quotes.as_slice()))
    }
}

/// One pending validation check for a (base, quote) pair on one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTask {
    pub exchange: String,
    pub base: Instrument,
    pub quote: Instrument,
}

/// Result of validating one pair, whether obtained live or from cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exchange: String,
    pub base: Instrument,
    pub quote: Instrument,
    pub success: bool,
    /// Epoch millis of the live check that produced this verdict.
    pub stamp: u64,
    /// True when served from the cache without a network call.
    pub cached: bool,
}
