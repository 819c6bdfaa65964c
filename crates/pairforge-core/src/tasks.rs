//! Validation task generation.

use crate::domain::ValidationTask;
use crate::exchange::ExchangeDescriptor;

/// Enumerate every (base, quote) check still needed for one exchange: the
/// ordered cross product of its instrument list, minus self-pairs, pairs
/// already confirmed this run, and pairs outside the allow-list when one is
/// configured. Order is deterministic given the instrument list ordering.
pub fn generate(exchange: &ExchangeDescriptor) -> Vec<ValidationTask> {
    let mut tasks = Vec::new();
    for base in &exchange.instruments {
        for quote in &exchange.instruments {
            if base == quote {
                continue;
            }
            if exchange.pairs.contains(base, quote) {
                continue;
            }
            if !exchange.is_pair_allowed(base, quote) {
                continue;
            }
            tasks.push(ValidationTask {
                exchange: exchange.code.clone(),
                base: base.clone(),
                quote: quote.clone(),
            });
        }
    }
    tasks
}
