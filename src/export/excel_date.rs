use chrono::{NaiveDate, NaiveDateTime};

/// Excel serial number + number format for a `YYYY-MM-DD HH:MM` or
/// `YYYY-MM-DD` cell, `None` for anything else.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(("yyyy-mm-dd hh:mm", excel_serial(&dt)?));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(("yyyy-mm-dd", excel_serial(&d.and_hms_opt(0, 0, 0)?)?));
    }

    None
}

/// Days since 1899-12-30, fraction = time of day.
fn excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let secs = (*dt - epoch).num_seconds() as f64;
    Some(secs / 86_400.0)
}
