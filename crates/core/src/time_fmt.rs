// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duration parsing and timestamp formatting.

use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,
    #[error("invalid number in duration: {0}")]
    InvalidNumber(String),
    #[error("unknown duration unit '{unit}' in: {input}")]
    UnknownUnit { unit: char, input: String },
    #[error("duration out of range: {0}")]
    OutOfRange(String),
}

/// Parse a human-readable duration such as `30s`, `5m`, `1h30m`, `14d`, or `2.5h`.
///
/// A bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let mut total = 0.0_f64;
    let mut current = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() || c == '.' {
            current.push(c);
            continue;
        }
        if c.is_whitespace() {
            continue;
        }
        let n: f64 =
            current.parse().map_err(|_| DurationParseError::InvalidNumber(input.to_string()))?;
        current.clear();
        total += n * match c {
            's' => 1.0,
            'm' => 60.0,
            'h' => 3600.0,
            'd' => 86400.0,
            unit => return Err(DurationParseError::UnknownUnit { unit, input: input.to_string() }),
        };
    }
    if !current.is_empty() {
        let n: f64 =
            current.parse().map_err(|_| DurationParseError::InvalidNumber(input.to_string()))?;
        total += n;
    }
    Duration::try_from_secs_f64(total).map_err(|_| DurationParseError::OutOfRange(input.to_string()))
}

/// Format unix seconds as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_timestamp(epoch_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format elapsed seconds compactly: `5s`, `2m`, `1h`, `3d`.
pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
