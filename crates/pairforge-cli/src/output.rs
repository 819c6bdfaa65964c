//! Terminal output: progress gauge and run summary.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use pairforge_core::{Outcome, ProgressSink, RunSummary};

/// Block-style progress gauge driven by the aggregator. Hidden entirely in
/// `--no-gauge` and debug runs so log lines stay readable.
pub struct GaugeProgress {
    bar: ProgressBar,
}

impl GaugeProgress {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(" {bar:60}: {pos} of {len}")
                .unwrap()
                .progress_chars("█░"),
        );
        Self { bar }
    }
}

impl ProgressSink for GaugeProgress {
    fn on_outcome(&mut self, processed: usize, total: usize, _outcome: &Outcome) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(processed as u64);
    }

    fn on_finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Final one-line accounting, matching the long-standing summary format.
pub fn print_summary(summary: &RunSummary) {
    println!(
        "Total {} pairs ({:.0}% cached), invalid: {}, confirmed: {}",
        summary.processed,
        summary.cache_hit_percent(),
        summary.rejected.red(),
        summary.confirmed.green(),
    );
}
