use crate::errors::{AppError, AppResult};
use crate::utils::date::last_day_of_month;
use chrono::NaiveDate;

/// Parse a report period into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(invalid(r, "start and end must have the same format"));
            }

            (period_bounds(start, r)?.0, period_bounds(end, r)?.1)
        }
        None => period_bounds(r.trim(), r)?,
    };

    if start > end {
        return Err(invalid(r, "start is after end"));
    }

    Ok((start, end))
}

/// Bounds of a single period token.
fn period_bounds(p: &str, whole: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(whole, "invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(whole, "invalid year"))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(whole, "invalid year"))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            if p.get(4..5) != Some("-") {
                return Err(invalid(whole, "expected YYYY-MM"));
            }
            let y: i32 = p
                .get(0..4)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid(whole, "invalid year"))?;
            let m: u32 = p
                .get(5..7)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid(whole, "invalid month"))?;
            let d1 =
                NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid(whole, "invalid month"))?;
            let d2 = last_day_of_month(y, m).ok_or_else(|| invalid(whole, "invalid month"))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| invalid(whole, "invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(whole, "unsupported period format")),
    }
}

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("'{r}': {why}"))
}
