//! Utility functions for the league core

use chrono::{DateTime, Months, NaiveDate, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    current_timestamp().date_naive()
}

/// First day inside a lookback window of `months` ending at `as_of`
pub fn lookback_cutoff(as_of: NaiveDate, months: u32) -> NaiveDate {
    as_of
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Absolute difference between two rating totals
pub fn rating_difference(total_a: i64, total_b: i64) -> i64 {
    (total_a - total_b).abs()
}
