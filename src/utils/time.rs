//! Time utilities: epoch-millisecond clock and argument parsing.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};

/// Current instant as epoch milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a CLI time value: integer epoch milliseconds, or an RFC 3339
/// timestamp converted to epoch milliseconds.
pub fn parse_millis(s: &str) -> AppResult<i64> {
    let s = s.trim();
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| {
            AppError::Validation(format!(
                "invalid time '{}': expected epoch milliseconds or RFC 3339",
                s
            ))
        })
}

pub fn parse_optional_millis(input: Option<&String>) -> AppResult<Option<i64>> {
    input.map(|s| parse_millis(s)).transpose()
}

/// Format milliseconds as `HH:MM:SS` for status lines.
pub fn format_duration(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let secs = ms.abs() / 1000;
    format!("{}{:02}:{:02}:{:02}", sign, secs / 3600, (secs / 60) % 60, secs % 60)
}
