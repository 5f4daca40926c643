//! Human-readable date rendering for reminder views.

use chrono::{DateTime, TimeZone};

/// Formats a date as `Monday, March 18, 2024`.
///
/// With `with_time`, prefixes the time as `9:05 | `: the hour is not padded,
/// minutes always have two digits.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, with_time: bool) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let day = date.format("%A, %B %-d, %Y");
    if with_time {
        format!("{} | {day}", date.format("%-H:%M"))
    } else {
        day.to_string()
    }
}
