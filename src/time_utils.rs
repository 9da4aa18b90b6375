// SPDX-License-Identifier: MIT

//! Shared helpers for date/time handling.
//!
//! Match schedules are published as local Taiwan dates and times
//! (e.g. "2025-11-02", "19:00"); both leagues play in UTC+8.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Taiwan has no DST, so a fixed offset is sufficient.
const TAIWAN_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a match's local date ("YYYY-MM-DD") and time ("HH:MM" or "HH:MM:SS")
/// into a UTC instant.
pub fn match_start_utc(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    let offset = FixedOffset::east_opt(TAIWAN_UTC_OFFSET_SECS)?;
    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_start_converts_to_utc() {
        let start = match_start_utc("2025-11-02", "19:00").unwrap();
        assert_eq!(format_utc_rfc3339(start), "2025-11-02T11:00:00Z");
    }

    #[test]
    fn test_match_start_accepts_seconds() {
        let start = match_start_utc("2025-11-02", "19:30:00").unwrap();
        assert_eq!(format_utc_rfc3339(start), "2025-11-02T11:30:00Z");
    }

    #[test]
    fn test_match_start_rejects_garbage() {
        assert!(match_start_utc("tomorrow", "19:00").is_none());
        assert!(match_start_utc("2025-11-02", "evening").is_none());
    }
}
