//! Clock-in / clock-out planning: decides what to send before anything
//! reaches the Mark Store.

use crate::errors::{AppError, AppResult};
use crate::models::mark::{Mark, latest, validate_coordinates};
use crate::models::mark_type::MarkType;
use crate::models::payload::ClockPayload;
use tracing::debug;

/// Where the user stands given their marks.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockState {
    /// No open session: the next mark must be a clock-in.
    ClockedOut { last: Option<Mark> },
    /// The latest mark is a clock-in.
    ClockedIn { since: Mark },
}

impl ClockState {
    pub fn from_marks(marks: &[Mark]) -> Self {
        match latest(marks) {
            Some(m) if m.is_clock_in() => ClockState::ClockedIn { since: m.clone() },
            other => ClockState::ClockedOut {
                last: other.cloned(),
            },
        }
    }

    pub fn can_clock_out(&self) -> bool {
        matches!(self, ClockState::ClockedIn { .. })
    }
}

/// The request to send, plus a note when the PO given was overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockPlan {
    pub kind: MarkType,
    pub payload: ClockPayload,
    pub po_overridden: bool,
}

pub struct ClockLogic;

impl ClockLogic {
    /// Validate and build a clock request.
    ///
    /// A clock-out requires an open clock-in and carries that clock-in's PO
    /// number, whatever was typed.
    pub fn plan(
        kind: MarkType,
        marks: &[Mark],
        latitude: f64,
        longitude: f64,
        po: Option<String>,
    ) -> AppResult<ClockPlan> {
        validate_coordinates(latitude, longitude)?;

        let po = po.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        let state = ClockState::from_marks(marks);

        let (po_number, po_overridden) = match (kind, &state) {
            (MarkType::ClockIn, _) => (po, false),
            (MarkType::ClockOut, ClockState::ClockedIn { since }) => {
                let locked = since.po().map(str::to_string);
                let overridden = po.is_some() && po != locked;
                (locked, overridden)
            }
            (MarkType::ClockOut, ClockState::ClockedOut { .. }) => {
                return Err(AppError::Validation(
                    "You need to clock in before clocking out.".to_string(),
                ));
            }
        };

        debug!(kind = %kind, po = ?po_number, "clock request planned");

        Ok(ClockPlan {
            kind,
            payload: ClockPayload {
                latitude,
                longitude,
                po_number,
            },
            po_overridden,
        })
    }
}
