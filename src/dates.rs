//! Calendar-day helpers shared by the analysis and streak engines.
//!
//! Every date in this crate is a local calendar day serialized as
//! `YYYY-MM-DD`, so lexicographic string comparison is a valid date
//! comparison. Nothing here does timezone arithmetic beyond "local day" -
//! callers supply dates already in local time.

use chrono::{Datelike, Duration, Local, NaiveDate};

pub const DAY_FORMAT: &str = "%Y-%m-%d";
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Today as a local calendar day.
pub fn local_today() -> NaiveDate {
  Local::now().date_naive()
}

pub fn format_day(date: NaiveDate) -> String {
  date.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` day key. Returns None for malformed input so callers
/// can warn-and-skip rather than fail.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).ok()
}

/// `YYYY-MM` key for the monthly freeze reset.
pub fn month_key(date: NaiveDate) -> String {
  date.format(MONTH_FORMAT).to_string()
}

pub fn days_ago(date: NaiveDate, days: i64) -> NaiveDate {
  date - Duration::days(days)
}

/// The Sunday that starts the week containing `date`. Week buckets in the
/// streak engine are keyed by this day.
pub fn week_start(date: NaiveDate) -> NaiveDate {
  let days_from_sunday = date.weekday().num_days_from_sunday() as i64;
  date - Duration::days(days_from_sunday)
}

pub fn week_start_key(date: NaiveDate) -> String {
  format_day(week_start(date))
}

/// Inclusive number of days from `start` through `end`, or 0 if reversed.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
  if end < start {
    0
  } else {
    (end - start).num_days() + 1
  }
}
