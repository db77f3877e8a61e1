pub mod test_utils;
pub mod time;

pub use time::{
    day_of_week, format_date, format_time, format_time_display, is_time_in_past_at, parse_time,
    to_datetime, TimeFormatError, MINUTES_PER_DAY,
};
