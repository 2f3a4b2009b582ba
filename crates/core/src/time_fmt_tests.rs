// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    seconds       = { "30s",    30 },
    minutes       = { "5m",     300 },
    hours         = { "2h",     7200 },
    days          = { "14d",    1_209_600 },
    combined      = { "1h30m",  5400 },
    spaced        = { "1h 30m", 5400 },
    bare_number   = { "45",     45 },
    zero          = { "0s",     0 },
)]
fn parses_whole_durations(input: &str, secs: u64) {
    assert_eq!(parse_duration(input).unwrap(), Duration::from_secs(secs));
}

#[test]
fn parses_fractional_durations() {
    assert_eq!(parse_duration("2.5h").unwrap(), Duration::from_secs(9000));
    assert_eq!(parse_duration("0.5s").unwrap(), Duration::from_millis(500));
}

#[test]
fn rejects_bad_input() {
    assert_eq!(parse_duration("  "), Err(DurationParseError::Empty));
    assert!(matches!(parse_duration("1w"), Err(DurationParseError::UnknownUnit { unit: 'w', .. })));
    assert!(matches!(parse_duration("1..2s"), Err(DurationParseError::InvalidNumber(_))));
    assert!(matches!(parse_duration("h"), Err(DurationParseError::InvalidNumber(_))));
}

#[test]
fn formats_timestamps_in_utc() {
    assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
    assert_eq!(format_timestamp(1_700_000_000), "2023-11-14 22:13:20");
    assert_eq!(format_timestamp(i64::MAX), "-");
}

#[yare::parameterized(
    secs  = { 5,      "5s" },
    mins  = { 125,    "2m" },
    hours = { 3700,   "1h" },
    days  = { 200000, "2d" },
)]
fn formats_elapsed(secs: u64, expected: &str) {
    assert_eq!(format_elapsed(secs), expected);
}
