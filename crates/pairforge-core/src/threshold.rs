//! Cache freshness threshold parsing.

use crate::ValidationError;

/// Default freshness threshold.
pub const DEFAULT_THRESHOLD: &str = "30d";

const MINUTE_MS: u64 = 60 * 1000;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Parse a threshold of the form `XXXZ`: a value in 1-999 with an optional
/// unit suffix `h`/`d`/`w`/`m`/`y` (months are 30 days, years 365). Without
/// a suffix the value is minutes. Returns milliseconds.
pub fn parse_threshold_ms(input: &str) -> Result<u64, ValidationError> {
    let invalid = || ValidationError::InvalidThreshold {
        value: input.to_string(),
    };

    let (digits, unit) = match input.find(|ch: char| !ch.is_ascii_digit()) {
        None => (input, None),
        Some(pos) => {
            let (digits, rest) = input.split_at(pos);
            let mut chars = rest.chars();
            let unit = chars.next();
            if chars.next().is_some() {
                return Err(invalid());
            }
            (digits, unit)
        }
    };

    if digits.is_empty() || digits.len() > 3 {
        return Err(invalid());
    }
    let value: u64 = digits.parse().map_err(|_| invalid())?;
    if value == 0 {
        return Err(invalid());
    }

    let multiplier = match unit {
        None => MINUTE_MS,
        Some('h') => HOUR_MS,
        Some('d') => DAY_MS,
        Some('w') => 7 * DAY_MS,
        Some('m') => 30 * DAY_MS,
        Some('y') => 365 * DAY_MS,
        Some(_) => return Err(invalid()),
    };

    Ok(value * multiplier)
}
