//! Mark Store REST API: authentication state, HTTP client and the
//! [`MarkStore`] seam the report logic is written against.

pub mod auth;
pub mod client;

use crate::errors::AppResult;
use crate::models::id::Id;
use crate::models::mark::Mark;
use crate::models::payload::{ClockPayload, MarkUpdate, NewMark, UserUpdate};
use crate::models::report::WeeklyReport;
use crate::models::user::User;
use chrono::NaiveDate;

/// Operations of the Mark Store used by this crate.
pub trait MarkStore {
    fn current_user(&self) -> AppResult<User>;
    fn list_users(&self) -> AppResult<Vec<User>>;
    fn user_by_id(&self, id: &Id) -> AppResult<User>;
    fn update_user(&self, id: &Id, update: &UserUpdate) -> AppResult<User>;

    /// Marks of the authenticated user, newest first.
    fn my_marks(&self) -> AppResult<Vec<Mark>>;
    fn clock_in(&self, payload: &ClockPayload) -> AppResult<Mark>;
    fn clock_out(&self, payload: &ClockPayload) -> AppResult<Mark>;

    /// Server-side aggregated report. `browser_offset_minutes` is minutes
    /// behind UTC (UTC-5 → 300).
    fn weekly_report(
        &self,
        user_id: &Id,
        start: NaiveDate,
        end: NaiveDate,
        browser_offset_minutes: i32,
    ) -> AppResult<WeeklyReport>;

    fn create_mark(&self, mark: &NewMark) -> AppResult<Mark>;
    fn update_mark(&self, id: &Id, update: &MarkUpdate) -> AppResult<Mark>;
    fn delete_mark(&self, id: &Id) -> AppResult<()>;
}
