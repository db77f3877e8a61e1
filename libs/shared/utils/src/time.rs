// Wall-clock codec shared by the availability engine and the booking services.
//
// All values are naive local clock readings in the single configured zone.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("Invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parses `"HH:MM"` into minutes since midnight.
///
/// Hours are not capped so that `"24:00"` can close a working day.
pub fn parse_time(time: &str) -> Result<i32, TimeFormatError> {
    let invalid = || TimeFormatError::InvalidTime(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.trim().parse().map_err(|_| invalid())?;

    if hours < 0 || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as zero-padded `"HH:MM"`, wrapping past midnight.
pub fn format_time(minutes: i32) -> String {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn parse_date(date: &str) -> Result<NaiveDate, TimeFormatError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| TimeFormatError::InvalidDate(date.to_string()))
}

/// Weekday of a `"YYYY-MM-DD"` date, Sunday = 0.
pub fn day_of_week(date: &str) -> Result<u8, TimeFormatError> {
    let date = parse_date(date)?;
    Ok(date.weekday().num_days_from_sunday() as u8)
}

/// `"2024-03-15"` -> `"March 15, 2024"`.
pub fn format_date(date: &str) -> Result<String, TimeFormatError> {
    Ok(parse_date(date)?.format("%B %-d, %Y").to_string())
}

/// `"09:00"` -> `"9:00 AM"`, `"00:15"` -> `"12:15 AM"`.
pub fn format_time_display(time: &str) -> Result<String, TimeFormatError> {
    let minutes = parse_time(time)?;
    let (hours, minutes) = ((minutes / 60) % 24, minutes % 60);
    let period = if hours >= 12 { "PM" } else { "AM" };
    let hour = match hours % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{}:{:02} {}", hour, minutes, period))
}

/// Wall-clock instant of `time` on `date`.
pub fn to_datetime(date: &str, time: &str) -> Result<NaiveDateTime, TimeFormatError> {
    let minutes = parse_time(time)?;
    let midnight = parse_date(date)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| TimeFormatError::InvalidDate(date.to_string()))?;
    Ok(midnight + Duration::minutes(minutes as i64))
}

/// True when the appointment starts less than `min_notice_hours` after `now`,
/// or has already started.
pub fn is_time_in_past_at(
    date: &str,
    time: &str,
    min_notice_hours: u32,
    now: NaiveDateTime,
) -> Result<bool, TimeFormatError> {
    let appointment = to_datetime(date, time)?;
    Ok(appointment - now < Duration::hours(min_notice_hours as i64))
}
