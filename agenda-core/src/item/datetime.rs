//! ISO-8601 wall-clock datetimes as they cross the storage boundary.
//!
//! Stored values are local times without an offset (`2025-03-20T15:00:00`).
//! Parsing also accepts the minute-precision form produced by datetime-local
//! inputs and full RFC 3339 strings, which are converted to local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Whole-second values print without a fraction; sub-second values keep it.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601 datetime in any of the accepted shapes.
pub fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    // Bare dates anchor at midnight
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_iso_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso_datetime(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_iso_datetime(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO-8601 datetime '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_minute_precision_form_input() {
        let dt = parse_iso_datetime("2025-03-20T15:00").expect("Should parse");
        assert_eq!(format_iso_datetime(&dt), "2025-03-20T15:00:00");
    }

    #[test]
    fn parses_fractional_seconds() {
        let dt = parse_iso_datetime("2025-03-20T15:00:30.250").expect("Should parse");
        assert_eq!(dt.second(), 30);
    }

    #[test]
    fn fractional_seconds_survive_format_and_parse() {
        let dt = NaiveDate::from_ymd_opt(2030, 3, 20)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 250)
            .unwrap();

        let text = format_iso_datetime(&dt);
        assert_eq!(text, "2030-03-20T10:00:00.250");
        assert_eq!(parse_iso_datetime(&text), Some(dt));
    }

    #[test]
    fn bare_date_anchors_at_midnight() {
        let dt = parse_iso_datetime("2025-03-20").expect("Should parse");
        assert_eq!(format_iso_datetime(&dt), "2025-03-20T00:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_iso_datetime("next tuesday").is_none());
        assert!(parse_iso_datetime("").is_none());
    }
}
