use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Weekday from its English name or three-letter abbreviation.
pub fn parse_weekday(s: &str) -> AppResult<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| AppError::Config(format!("Unknown weekday '{s}'")))
}

/// The report week containing `day`: the most recent `week_start`
/// (inclusive) through the six days after it.
///
/// With the portal's Saturday start, a Wednesday maps to the previous
/// Saturday → the coming Friday.
pub fn week_containing(day: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let back = (7 + day.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let start = day - Duration::days(back as i64);
    (start, start + Duration::days(6))
}

/// Every calendar day in `[start, end]`; empty when `start > end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
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
        12 => "December",
        _ => "",
    }
}

/// `2024-01-06` → `Saturday, January 6, 2024`
pub fn long_date(d: NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        d.format("%A"),
        month_name(d.month()),
        d.day(),
        d.year()
    )
}
