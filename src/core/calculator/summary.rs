//! Employees hours summary: one total per employee plus a grand total.

use crate::models::report::{EmployeeHours, EmployeesSummary, WeeklyReport};
use crate::models::user::User;
use chrono::NaiveDate;

/// Combine per-user weekly reports into the employees summary.
///
/// Rows keep the order of `entries`; the grand total is the sum of the
/// rows.
pub fn build_summary(
    start: NaiveDate,
    end: NaiveDate,
    entries: &[(User, WeeklyReport)],
) -> EmployeesSummary {
    let employees: Vec<EmployeeHours> = entries
        .iter()
        .map(|(user, report)| EmployeeHours {
            user_id: user.id.clone(),
            user_name: user.display_name(),
            user_email: user.email.clone(),
            total_hours: report.total_hours,
        })
        .collect();

    let total_hours = employees.iter().map(|e| e.total_hours).sum();

    EmployeesSummary {
        start_date: start,
        end_date: end,
        employees,
        total_hours,
    }
}
