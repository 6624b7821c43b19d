//! Time utilities: timestamp normalization, viewer-zone offsets, hour math
//! and hour formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, TimeDelta, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serializer};
use std::sync::LazyLock;

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<date>\d{4}-\d{2}-\d{2})[Tt ](?P<hm>\d{2}:\d{2})(?P<sec>:\d{2}(?:\.\d+)?)?(?P<zone>[Zz]|[+-]\d{2}:?\d{2})?$",
    )
    .expect("timestamp pattern is valid")
});

/// Parse a raw timestamp into a UTC instant.
///
/// A string with an explicit `Z` or `±HH:MM` suffix is taken as-is; a naive
/// one gets `Z` appended, i.e. is read as UTC. A bare `YYYY-MM-DD` is
/// midnight UTC.
pub fn to_zoned_instant(raw: &str) -> AppResult<DateTime<Utc>> {
    let s = raw.trim();

    if let Some(caps) = TIMESTAMP_RE.captures(s) {
        let sec = caps.name("sec").map_or(":00", |m| m.as_str());
        let zone = match caps.name("zone").map(|m| m.as_str()) {
            None | Some("Z") | Some("z") => "Z".to_string(),
            Some(z) if z.contains(':') => z.to_string(),
            Some(z) => format!("{}:{}", &z[..3], &z[3..]),
        };
        let canonical = format!("{}T{}{}{}", &caps["date"], &caps["hm"], sec, zone);

        return DateTime::parse_from_rfc3339(&canonical)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AppError::InvalidTimestamp(raw.to_string()));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = d.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(AppError::InvalidTimestamp(raw.to_string()))
}

/// serde adapter: any timestamp string accepted by [`to_zoned_instant`].
pub fn deserialize_utc_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    to_zoned_instant(&raw).map_err(serde::de::Error::custom)
}

/// serde adapter: calendar day, tolerating a trailing time part
/// (`2024-01-01T00:00:00` is read as `2024-01-01`).
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(raw.as_str());
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| serde::de::Error::custom(format!("invalid calendar date '{raw}'")))
}

/// Naive UTC, the form the Mark Store stores (`2024-01-01T08:00:00`).
pub fn naive_utc_string(ts: &DateTime<Utc>) -> String {
    ts.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn serialize_naive_utc<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&naive_utc_string(ts))
}

pub fn serialize_opt_naive_utc<S: Serializer>(
    ts: &Option<DateTime<Utc>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize_naive_utc(ts, s),
        None => s.serialize_none(),
    }
}

/// Viewer zone from an east-positive offset in minutes (UTC-5 → -300).
pub fn viewer_zone(utc_offset_minutes: i32) -> AppResult<FixedOffset> {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            AppError::Config(format!(
                "UTC offset out of range: {utc_offset_minutes} minutes"
            ))
        })
}

/// Current offset of the machine's local zone, east-positive minutes.
pub fn local_offset_minutes() -> i32 {
    Local::now().offset().fix().local_minus_utc() / 60
}

/// The `timezone_offset_minutes` query value: minutes *behind* UTC, as the
/// portal's browser client reports it (UTC-5 → 300).
pub fn browser_offset_minutes(zone: &FixedOffset) -> i32 {
    -zone.local_minus_utc() / 60
}

/// Hours between two instants at full (nanosecond) precision, never
/// negative.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let d = end - start;
    if d <= TimeDelta::zero() {
        return 0.0;
    }
    d.num_seconds() as f64 / 3600.0 + f64::from(d.subsec_nanos()) / 3.6e12
}

/// `8.5` → `"8.50"`
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

/// `8.5` → `"08h 30m"`
pub fn hours2readable(hours: f64) -> String {
    let mins = (hours * 60.0).round() as i64;
    format!("{:02}h {:02}m", mins / 60, mins % 60)
}
