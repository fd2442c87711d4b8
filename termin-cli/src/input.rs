//! Parsing of user-entered date/time values.

use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a timestamp from CLI input.
///
/// Accepts RFC 3339 (offset preserved) or a bare date-time, which is kept as
/// entered with a zero offset so the feed reuses the wall-clock value.
pub fn parse_datetime(input: &str) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    Err(anyhow!(
        "Could not parse '{input}' (expected e.g. 2025-03-20T15:00 or RFC 3339)"
    ))
}

/// Format a timestamp the way `parse_datetime` accepts it, for prompt
/// defaults.
pub fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let dt = parse_datetime("2024-06-01T09:00:00+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(dt.naive_local().to_string(), "2024-06-01 09:00:00");
    }

    #[test]
    fn test_parse_bare_datetime() {
        let dt = parse_datetime("2025-03-20T15:00").unwrap();
        assert_eq!(dt.naive_local().to_string(), "2025-03-20 15:00:00");

        assert!(parse_datetime("2025-03-20 15:30").is_ok());
        assert!(parse_datetime("2025-03-20T15:30:45").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("tomorrow").is_err());
        assert!(parse_datetime("").is_err());
    }

    #[test]
    fn test_format_roundtrips_through_parse() {
        let dt = parse_datetime("2025-03-20T15:00").unwrap();
        let formatted = format_datetime(&dt);
        assert_eq!(parse_datetime(&formatted).unwrap().naive_local(), dt.naive_local());
    }
}
