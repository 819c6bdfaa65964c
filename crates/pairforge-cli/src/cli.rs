//! CLI argument definitions for pairforge.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `-t/--threshold` | `30d` | Cache freshness threshold |
//! | `-n/--no-cache` | off | Skip cache reads and writes |
//! | `-o/--out` | none | Generated data file path |
//! | `-s/--show` | off | Echo generated data to stdout |
//! | `-f/--force` | off | Overwrite an existing output file |
//! | `-e/--exchange` | none | Process only matching exchanges |
//! | `-w/--workers` | `6` | Concurrent validation workers |
//! | `--cache-dir` | `~/.pairforge/cache` | Cache root override |
//! | `-r/--dry-run` | off | No cache writes, no file writes |
//! | `-g/--no-gauge` | off | Suppress the progress gauge |

use std::path::PathBuf;

use clap::Parser;

use pairforge_core::threshold::{parse_threshold_ms, DEFAULT_THRESHOLD};
use pairforge_core::DEFAULT_WORKERS;

/// Validates exchange ticker pairs and generates the widget data file.
#[derive(Debug, Parser)]
#[command(
    name = "pairforge",
    author,
    version,
    about = "Exchange ticker pair validator and data file generator",
    long_about = "Queries the public ticker APIs of the supported exchanges to discover \
which currency pairs are actually tradable, caches each verdict on disk, and \
generates the data file consumed by the tracker widget.\n\
\n\
Typical usage:\n\
  pairforge -o src/contents/js/crypto_data.js"
)]
pub struct Cli {
    /// Cache validity threshold: 1-999 with an optional h/d/w/m/y suffix
    /// (minutes when no suffix is given).
    #[arg(
        short = 't',
        long = "threshold",
        value_name = "SPEC",
        value_parser = threshold_value,
        default_value = DEFAULT_THRESHOLD
    )]
    pub threshold_ms: u64,

    /// Ignore the validation result cache and always do the full API check.
    #[arg(short = 'n', long = "no-cache")]
    pub no_cache: bool,

    /// Name of the data file to be generated.
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Output generated data to stdout.
    #[arg(short = 's', long)]
    pub show: bool,

    /// Overwrite an existing output file.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Process only exchanges whose id or name contains FILTER; such
    /// exchanges are used even when marked disabled.
    #[arg(short = 'e', long = "exchange", value_name = "FILTER")]
    pub exchange: Option<String>,

    /// Number of concurrent validation workers.
    #[arg(short = 'w', long, value_name = "N", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Cache root directory.
    #[arg(long = "cache-dir", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Run the checks but write neither cache records nor the output file.
    #[arg(short = 'r', long = "dry-run")]
    pub dry_run: bool,

    /// Suppress the progress gauge.
    #[arg(short = 'g', long = "no-gauge")]
    pub no_gauge: bool,

    /// Verbose run information.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Per-request debug logging (implies --no-gauge).
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Cli {
    pub fn gauge_enabled(&self) -> bool {
        !self.no_gauge && !self.debug
    }
}

fn threshold_value(raw: &str) -> Result<u64, String> {
    parse_threshold_ms(raw).map_err(|error| error.to_string())
}
