use super::{id::Id, mark_type::MarkType};
use crate::errors::{AppError, AppResult};
use crate::utils::time;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One recorded clock event, as stored by the Mark Store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mark {
    pub id: Id,
    pub user_id: Id,
    pub mark_type: MarkType,
    /// Stored as naive UTC on the server; see [`time::to_zoned_instant`].
    #[serde(deserialize_with = "time::deserialize_utc_instant")]
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub po_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Mark {
    pub fn is_clock_in(&self) -> bool {
        self.mark_type.is_in()
    }

    /// PO number with blank values treated as absent.
    pub fn po(&self) -> Option<&str> {
        self.po_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Timestamp rendered in the viewer zone, e.g. `2024-01-01 09:00`.
    pub fn local_time_str<Tz: TimeZone>(&self, zone: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.timestamp
            .with_timezone(zone)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

/// Latitude in [-90, 90], longitude in [-180, 180].
pub fn validate_coordinates(latitude: f64, longitude: f64) -> AppResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::Validation(format!(
            "Latitude {latitude} is out of range [-90, 90]"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::Validation(format!(
            "Longitude {longitude} is out of range [-180, 180]"
        )));
    }
    Ok(())
}

/// Most recent mark by timestamp. `/marks/my-marks` returns newest first,
/// so among marks sharing the latest timestamp the first listed one wins.
pub fn latest(marks: &[Mark]) -> Option<&Mark> {
    marks
        .iter()
        .reduce(|best, m| if m.timestamp > best.timestamp { m } else { best })
}
