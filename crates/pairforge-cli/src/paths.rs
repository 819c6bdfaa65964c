//! Path utilities for pairforge.
//!
//! Generated-state lives under `~/.pairforge/`:
//! - `~/.pairforge/cache/<exchange>/<BASE>-<QUOTE>` - validation verdicts

use std::path::PathBuf;

/// Returns the pairforge home directory (`~/.pairforge/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pairforge")
}

/// Returns the default verdict cache root (`~/.pairforge/cache/`).
pub fn default_cache_dir() -> PathBuf {
    home_dir().join("cache")
}
