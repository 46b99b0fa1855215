//! Credential lifetime parsing
//!
//! Lifetimes are configured as a number with an optional unit suffix:
//! `30s`, `15m`, `12h`, `7d`, or a bare number of seconds such as `3600`.
//! The unit is always read explicitly; a value whose suffix is not one of
//! the supported units is rejected rather than guessed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use super::ConfigError;

static TTL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*([A-Za-z]*)\s*$").expect("TTL pattern is a valid regex")
});

/// Unit suffix of a configured lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TtlUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "" | "s" | "sec" | "secs" => Some(TtlUnit::Seconds),
            "m" | "min" | "mins" => Some(TtlUnit::Minutes),
            "h" | "hr" | "hrs" => Some(TtlUnit::Hours),
            "d" | "day" | "days" => Some(TtlUnit::Days),
            _ => None,
        }
    }

    /// Number of seconds in one unit
    pub fn seconds(self) -> u64 {
        match self {
            TtlUnit::Seconds => 1,
            TtlUnit::Minutes => 60,
            TtlUnit::Hours => 3_600,
            TtlUnit::Days => 86_400,
        }
    }
}

/// Parse a configured lifetime string into a `Duration`
///
/// # Errors
/// Returns `ConfigError::InvalidTtl` when the value has no numeric prefix,
/// carries an unknown unit, is zero, or overflows.
pub fn parse_ttl(value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidTtl {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let captures = TTL_PATTERN
        .captures(value)
        .ok_or_else(|| invalid("expected <number>[s|m|h|d]"))?;

    let amount: u64 = captures[1]
        .parse()
        .map_err(|_| invalid("numeric part out of range"))?;
    let unit = TtlUnit::from_suffix(&captures[2]).ok_or_else(|| invalid("unknown unit"))?;

    if amount == 0 {
        return Err(invalid("lifetime must be greater than zero"));
    }

    let seconds = amount
        .checked_mul(unit.seconds())
        .ok_or_else(|| invalid("lifetime overflows"))?;

    Ok(Duration::from_secs(seconds))
}
