//! Admin-side mark editing: validation of new marks, edits and manual
//! sessions.

use crate::api::MarkStore;
use crate::errors::{AppError, AppResult};
use crate::models::id::Id;
use crate::models::mark::{Mark, validate_coordinates};
use crate::models::mark_type::MarkType;
use crate::models::payload::{MarkUpdate, NewMark};
use crate::ui::messages::warning;
use chrono::{DateTime, Utc};
use tracing::warn;

pub struct MarkLogic;

impl MarkLogic {
    pub fn new_mark(
        user_id: Id,
        mark_type: MarkType,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        po: Option<String>,
    ) -> AppResult<NewMark> {
        validate_coordinates(latitude, longitude)?;

        Ok(NewMark {
            user_id,
            mark_type,
            timestamp,
            latitude,
            longitude,
            po_number: clean_po(po),
        })
    }

    /// A manually entered session: a clock-in and its clock-out.
    /// The clock-out must be strictly after the clock-in.
    pub fn new_session(
        user_id: Id,
        clock_in: DateTime<Utc>,
        clock_out: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        po: Option<String>,
    ) -> AppResult<(NewMark, NewMark)> {
        validate_session_times(clock_in, clock_out)?;

        let po = clean_po(po);
        let mark_in = Self::new_mark(
            user_id.clone(),
            MarkType::ClockIn,
            clock_in,
            latitude,
            longitude,
            po.clone(),
        )?;
        let mark_out = Self::new_mark(
            user_id,
            MarkType::ClockOut,
            clock_out,
            latitude,
            longitude,
            po,
        )?;

        Ok((mark_in, mark_out))
    }

    /// Send both marks of a manual session. If the clock-out is rejected,
    /// the clock-in just created is deleted again so no open session is
    /// left behind; the clock-out error is returned either way.
    pub fn add_session(
        store: &impl MarkStore,
        mark_in: &NewMark,
        mark_out: &NewMark,
    ) -> AppResult<(Mark, Mark)> {
        let created_in = store.create_mark(mark_in)?;

        match store.create_mark(mark_out) {
            Ok(created_out) => Ok((created_in, created_out)),
            Err(e) => {
                match store.delete_mark(&created_in.id) {
                    Ok(()) => {
                        warn!(mark_id = %created_in.id, "clock-out rejected, clock-in rolled back");
                    }
                    Err(cleanup) => {
                        warn!(mark_id = %created_in.id, error = %cleanup, "rollback failed");
                        warning(format!(
                            "Clock-in #{} was created but its clock-out failed; delete it with `rclockmarks marks delete {}`",
                            created_in.id, created_in.id
                        ));
                    }
                }
                Err(e)
            }
        }
    }

    pub fn update(update: MarkUpdate) -> AppResult<MarkUpdate> {
        if update.is_empty() {
            return Err(AppError::Validation(
                "Nothing to update: pass at least one field".to_string(),
            ));
        }

        if let Some(lat) = update.latitude {
            validate_coordinates(lat, 0.0)?;
        }
        if let Some(lon) = update.longitude {
            validate_coordinates(0.0, lon)?;
        }

        Ok(update)
    }
}

pub fn validate_session_times(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> AppResult<()> {
    if clock_out <= clock_in {
        return Err(AppError::Validation(format!(
            "Clock-out ({}) must be after clock-in ({})",
            clock_out.format("%Y-%m-%d %H:%M"),
            clock_in.format("%Y-%m-%d %H:%M")
        )));
    }
    Ok(())
}

fn clean_po(po: Option<String>) -> Option<String> {
    po.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}
