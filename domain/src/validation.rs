//! Validation of user supplied command input.
//!
//! Everything here runs before any request is made and fails with a `Validation` error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use meeting_auth::error::{validation_error, Error};

/// Longest meeting Zoom accepts for a single scheduled meeting, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 1440;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse `--duration` into minutes within `1..=1440`.
pub fn parse_duration(raw: &str) -> Result<u32, Error> {
    let minutes: i64 = raw
        .trim()
        .parse()
        .map_err(|_| validation_error("--duration must be a positive number."))?;

    if minutes <= 0 {
        return Err(validation_error("--duration must be a positive number."));
    }
    if minutes > i64::from(MAX_DURATION_MINUTES) {
        return Err(validation_error(
            "--duration must not exceed 1440 minutes (24 hours).",
        ));
    }
    Ok(minutes as u32)
}

/// Parse a meeting ID, which must be a positive integer.
pub fn parse_meeting_id(raw: &str) -> Result<u64, Error> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(validation_error("Meeting ID must be a positive integer.")),
    }
}

/// Parse `--start` as an instant.
///
/// RFC 3339 values carry their own offset. Values without an offset
/// (`YYYY-MM-DDTHH:MM[:SS]`) are read as wall-clock time in `timezone`.
pub fn parse_start_time(raw: &str, timezone: Tz) -> Result<DateTime<Utc>, Error> {
    let invalid = || validation_error("--start must be a valid ISO 8601 datetime.");

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(invalid)?;

    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// Parse a `--from`/`--to` value, which must be a real `YYYY-MM-DD` date.
pub fn parse_list_date(flag: &str, raw: &str) -> Result<NaiveDate, Error> {
    let invalid = || validation_error(format!("{flag} must be in YYYY-MM-DD format."));

    let well_formed = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

/// Validate an optional list window; `from` may equal but not follow `to`.
pub fn validate_date_range(from: Option<&str>, to: Option<&str>) -> Result<(), Error> {
    let from = from.map(|d| parse_list_date("--from", d)).transpose()?;
    let to = to.map(|d| parse_list_date("--to", d)).transpose()?;

    match (from, to) {
        (Some(from), Some(to)) if from > to => {
            Err(validation_error("--from must not be after --to."))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meeting_auth::ErrorKind;

    fn message(result: Result<impl std::fmt::Debug, Error>) -> String {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        err.message().to_string()
    }

    #[test]
    fn test_duration_accepts_range() {
        assert_eq!(parse_duration("60").unwrap(), 60);
        assert_eq!(parse_duration("1").unwrap(), 1);
        assert_eq!(parse_duration("1440").unwrap(), 1440);
    }

    #[test]
    fn test_duration_rejects_non_positive_and_garbage() {
        for raw in ["0", "-30", "invalid", "", "12.5"] {
            assert_eq!(
                message(parse_duration(raw)),
                "--duration must be a positive number."
            );
        }
    }

    #[test]
    fn test_duration_rejects_over_a_day() {
        assert_eq!(
            message(parse_duration("1441")),
            "--duration must not exceed 1440 minutes (24 hours)."
        );
    }

    #[test]
    fn test_meeting_id() {
        assert_eq!(parse_meeting_id("12345678901").unwrap(), 12345678901);
        for raw in ["0", "-123", "abc", "123.45", ""] {
            assert_eq!(
                message(parse_meeting_id(raw)),
                "Meeting ID must be a positive integer."
            );
        }
    }

    #[test]
    fn test_start_time_with_offset() {
        let instant = parse_start_time("2026-02-10T10:00:00Z", chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-02-10T10:00:00+00:00");

        let instant =
            parse_start_time("2026-02-10T19:00:00+09:00", chrono_tz::UTC).unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-02-10T10:00:00+00:00");
    }

    #[test]
    fn test_start_time_without_offset_uses_timezone() {
        let instant = parse_start_time("2026-02-10T19:00:00", chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-02-10T10:00:00+00:00");

        let instant = parse_start_time("2026-02-10T10:00", chrono_tz::UTC).unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-02-10T10:00:00+00:00");
    }

    #[test]
    fn test_start_time_rejects_garbage() {
        for raw in ["invalid-date", "2026-02-30T10:00:00", "10:00", ""] {
            assert_eq!(
                message(parse_start_time(raw, chrono_tz::UTC)),
                "--start must be a valid ISO 8601 datetime."
            );
        }
    }

    #[test]
    fn test_list_date_format() {
        assert!(parse_list_date("--from", "2026-02-01").is_ok());
        assert_eq!(
            message(parse_list_date("--from", "2026/02/01")),
            "--from must be in YYYY-MM-DD format."
        );
        assert_eq!(
            message(parse_list_date("--to", "2026-2-1")),
            "--to must be in YYYY-MM-DD format."
        );
        assert_eq!(
            message(parse_list_date("--to", "2026-02-30")),
            "--to must be in YYYY-MM-DD format."
        );
    }

    #[test]
    fn test_date_range() {
        assert!(validate_date_range(None, None).is_ok());
        assert!(validate_date_range(Some("2026-02-01"), None).is_ok());
        assert!(validate_date_range(Some("2026-02-01"), Some("2026-02-28")).is_ok());
        assert!(validate_date_range(Some("2026-02-01"), Some("2026-02-01")).is_ok());
        assert_eq!(
            message(validate_date_range(Some("2026-03-01"), Some("2026-02-01"))),
            "--from must not be after --to."
        );
    }
}
