//! Calendar helpers used by statistics and reports.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc};

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `date` moved `days` forward, or `None` for a negative count or a result past the
/// last representable date.
pub fn add_days(date: NaiveDate, days: i32) -> Option<NaiveDate> {
    let days = u64::try_from(days).ok()?;
    date.checked_add_days(Days::new(days))
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The `count` months ending with the month of `date`, oldest first, as (year, month).
pub fn last_months(date: NaiveDate, count: u32) -> Vec<(i32, u32)> {
    let mut months = Vec::with_capacity(count as usize);
    let mut year = date.year();
    let mut month = date.month();

    for _ in 0..count {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    months.reverse();
    months
}

/// The `days` calendar days ending with `end`, oldest first.
pub fn last_days(end: NaiveDate, days: i64) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|offset| end - Duration::days(offset))
        .collect()
}

/// `YYYY-MM` key for grouping by month.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

pub fn same_month(timestamp: DateTime<Utc>, date: NaiveDate) -> bool {
    timestamp.year() == date.year() && timestamp.month() == date.month()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
