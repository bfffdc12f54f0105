//! Retention duration parsing
//!
//! Zabbix stores item retention as a short token: a count followed by an
//! optional one-letter unit. Only the units used for history/trends retention
//! are understood here.

use tracing::warn;

const DAYS_PER_WEEK: f64 = 7.0;
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Convert a retention token (`31d`, `2w`, `1y`, `48h`, `10`) to a day count.
///
/// Empty and `"0"` mean retention is disabled and yield `0.0`. A token that
/// cannot be parsed also yields `0.0`, with a warning, so it reads as already
/// compliant rather than aborting the run. Surrounding whitespace is not
/// stripped, matching the exact comparison used for legacy values.
pub fn parse_duration(token: &str) -> f64 {
    let normalized = token.to_lowercase();
    if normalized.is_empty() || normalized == "0" {
        return 0.0;
    }

    let (digits, unit) = match normalized.chars().last() {
        Some(c @ ('d' | 'w' | 'm' | 'y' | 'h')) => {
            (&normalized[..normalized.len() - 1], Unit::from_suffix(c))
        }
        _ => (normalized.as_str(), Unit::Day),
    };

    match digits.parse::<u64>() {
        Ok(count) => unit.to_days(count),
        Err(_) => {
            warn!(token, "unparseable retention value, treating as 0 days");
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn from_suffix(suffix: char) -> Self {
        match suffix {
            'h' => Unit::Hour,
            'w' => Unit::Week,
            'm' => Unit::Month,
            'y' => Unit::Year,
            _ => Unit::Day,
        }
    }

    fn to_days(self, count: u64) -> f64 {
        let count = count as f64;
        match self {
            Unit::Hour => count / HOURS_PER_DAY,
            Unit::Day => count,
            Unit::Week => count * DAYS_PER_WEEK,
            Unit::Month => count * DAYS_PER_MONTH,
            Unit::Year => count * DAYS_PER_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_values() {
        assert_eq!(parse_duration("0"), 0.0);
        assert_eq!(parse_duration(""), 0.0);
        assert_eq!(parse_duration("0d"), 0.0);
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(parse_duration("31d"), 31.0);
        assert_eq!(parse_duration("2w"), 14.0);
        assert_eq!(parse_duration("1m"), 30.0);
        assert_eq!(parse_duration("1y"), 365.0);
        assert_eq!(parse_duration("48h"), 2.0);
        assert_eq!(parse_duration("12h"), 0.5);
    }

    #[test]
    fn test_bare_integer_is_days() {
        assert_eq!(parse_duration("10"), 10.0);
        assert_eq!(parse_duration("365"), 365.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse_duration("31D"), 31.0);
        assert_eq!(parse_duration("1Y"), 365.0);
    }

    #[test]
    fn test_padded_tokens_fail_open() {
        assert_eq!(parse_duration(" 40d "), 0.0);
        assert_eq!(parse_duration("40d "), 0.0);
        assert_eq!(parse_duration(" 40d"), 0.0);
        assert_eq!(parse_duration(" 0"), 0.0);
    }

    #[test]
    fn test_malformed_fails_open() {
        assert_eq!(parse_duration("abc"), 0.0);
        assert_eq!(parse_duration("d"), 0.0);
        assert_eq!(parse_duration("-5d"), 0.0);
        assert_eq!(parse_duration("1.5d"), 0.0);
        assert_eq!(parse_duration("{$HISTORY}"), 0.0);
        assert_eq!(parse_duration("90s"), 0.0);
    }

    #[test]
    fn test_non_ascii_suffix_does_not_panic() {
        assert_eq!(parse_duration("5é"), 0.0);
        assert_eq!(parse_duration("ß"), 0.0);
    }

    #[test]
    fn test_deterministic() {
        for token in ["31d", "2w", "48h", "abc", "", "10"] {
            let first = parse_duration(token);
            assert_eq!(first, parse_duration(token));
            assert!(first >= 0.0);
        }
    }
}
