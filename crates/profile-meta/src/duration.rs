//! Duration literals such as `30s`, `1500ms` or `1m30s`

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::{Error, Result};

static DURATION_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:ms|s|m|h|d))+$").unwrap());

static DURATION_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(ms|s|m|h|d)").unwrap());

/// Parse a duration literal.
///
/// A literal is one or more `<digits><unit>` parts with units `ms`, `s`,
/// `m`, `h` and `d`; parts are summed, so `1m30s` is ninety seconds.
/// Surrounding whitespace is ignored.
///
/// # Example
///
/// ```
/// use profile_meta::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert!(parse_duration("30 seconds").is_err());
/// ```
pub fn parse_duration(literal: &str) -> Result<Duration> {
    let trimmed = literal.trim();
    let invalid = || Error::InvalidDuration {
        literal: literal.to_string(),
    };

    if !DURATION_LITERAL.is_match(trimmed) {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    for part in DURATION_PART.captures_iter(trimmed) {
        let amount: u64 = part[1].parse().map_err(|_| invalid())?;
        let step = match &part[2] {
            "ms" => Duration::from_millis(amount),
            "s" => Duration::from_secs(amount),
            "m" => Duration::from_secs(amount.checked_mul(60).ok_or_else(invalid)?),
            "h" => Duration::from_secs(amount.checked_mul(3_600).ok_or_else(invalid)?),
            "d" => Duration::from_secs(amount.checked_mul(86_400).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        total = total.checked_add(step).ok_or_else(invalid)?;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("1500ms").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3_600));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_compound_literal() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_duration(" 1s500ms ").unwrap(), Duration::from_millis(1_500));
    }

    #[test]
    fn test_invalid_literals() {
        for literal in ["", "30", "s", "30sec", "1.5s", "-5s", "5 s"] {
            let err = parse_duration(literal).unwrap_err();
            assert!(matches!(err, Error::InvalidDuration { .. }), "accepted {literal:?}");
        }
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(parse_duration("99999999999999999999s").is_err());
        assert!(parse_duration("18446744073709551615d").is_err());
    }
}
