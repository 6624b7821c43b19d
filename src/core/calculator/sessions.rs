//! Pairs clock-in marks with the clock-out that closes them.

use crate::models::mark::Mark;
use crate::models::mark_type::MarkType;
use crate::models::session::Session;
use crate::utils::time::hours_between;
use tracing::warn;

/// Rebuild work sessions from a user's marks.
///
/// - A new clock-in closes a still-open session without a clock-out.
/// - An orphan clock-out (no open session) is dropped.
/// - Negative durations are clamped to zero.
///
/// The input is never mutated; a stable-sorted copy is scanned.
pub fn reconstruct(marks: &[Mark]) -> Vec<Session> {
    let mut sorted: Vec<&Mark> = marks.iter().collect();
    sorted.sort_by_key(|m| m.timestamp);

    let mut sessions = Vec::new();
    let mut open: Option<Session> = None;

    for mark in sorted {
        match mark.mark_type {
            MarkType::ClockIn => {
                if let Some(unclosed) = open.take() {
                    warn!(
                        mark_id = %unclosed.clock_in.id,
                        "clock-in without clock-out, closing session with zero hours"
                    );
                    sessions.push(unclosed);
                }
                open = Some(Session::open(mark.clone()));
            }
            MarkType::ClockOut => match open.take() {
                Some(mut session) => {
                    session.hours_worked = hours_between(session.clock_in.timestamp, mark.timestamp);
                    session.clock_out = Some(mark.clone());
                    sessions.push(session);
                }
                None => {
                    warn!(mark_id = %mark.id, "orphan clock-out dropped");
                }
            },
        }
    }

    if let Some(unclosed) = open {
        sessions.push(unclosed);
    }

    sessions
}
