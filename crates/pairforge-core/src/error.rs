use thiserror::Error;

/// Validation and contract errors exposed by `pairforge-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("instrument code cannot be empty")]
    EmptyInstrument,
    #[error("instrument code length {len} exceeds max {max}")]
    InstrumentTooLong { len: usize, max: usize },
    #[error("instrument code contains invalid character '{ch}' at index {index}")]
    InstrumentInvalidChar { ch: char, index: usize },

    #[error("pair base and quote must differ: '{code}'")]
    SelfPair { code: String },

    #[error("exchange with id '{code}' already registered")]
    DuplicateExchange { code: String },

    #[error("invalid freshness threshold '{value}', expected 1-999 with optional h/d/w/m/y suffix")]
    InvalidThreshold { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
