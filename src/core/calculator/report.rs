//! Buckets sessions into calendar days of the viewer zone and builds the
//! weekly report.

use crate::core::calculator::sessions::reconstruct;
use crate::models::id::Id;
use crate::models::mark::Mark;
use crate::models::report::{DailyReport, WeeklyReport};
use crate::models::session::Session;
use crate::utils::date::days_in_range;
use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether days without sessions appear in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPolicy {
    /// Only days with at least one session.
    #[default]
    Sparse,
    /// Every day of the range, empty ones with zero hours.
    Dense,
}

/// Calendar day of the session start, seen from `zone`.
pub fn day_key<Tz: TimeZone>(session: &Session, zone: &Tz) -> NaiveDate {
    session.clock_in.timestamp.with_timezone(zone).date_naive()
}

/// Group sessions by clock-in day, days ascending, session order kept.
pub fn aggregate<Tz: TimeZone>(sessions: &[Session], zone: &Tz) -> Vec<DailyReport> {
    let mut days: BTreeMap<NaiveDate, Vec<Session>> = BTreeMap::new();

    for session in sessions {
        days.entry(day_key(session, zone))
            .or_default()
            .push(session.clone());
    }

    days.into_iter()
        .map(|(date, sessions)| DailyReport {
            date,
            total_hours: sessions.iter().map(|s| s.hours_worked).sum(),
            sessions,
        })
        .collect()
}

/// Who a report is about; names are filled in when known.
#[derive(Debug, Clone)]
pub struct ReportSubject {
    pub user_id: Id,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl ReportSubject {
    pub fn new(user_id: Id) -> Self {
        Self {
            user_id,
            user_name: None,
            user_email: None,
        }
    }
}

/// Client-side weekly report over `[start, end]` (inclusive, viewer days).
///
/// All marks are reconstructed first so a session starting inside the
/// window pairs with a clock-out that falls after it.
pub fn build_weekly_report<Tz: TimeZone>(
    subject: ReportSubject,
    marks: &[Mark],
    start: NaiveDate,
    end: NaiveDate,
    zone: &Tz,
    policy: DayPolicy,
) -> WeeklyReport {
    let own: Vec<Mark> = marks
        .iter()
        .filter(|m| m.user_id == subject.user_id)
        .cloned()
        .collect();

    let in_window: Vec<Session> = reconstruct(&own)
        .into_iter()
        .filter(|s| {
            let day = day_key(s, zone);
            day >= start && day <= end
        })
        .collect();

    let daily_reports = aggregate(&in_window, zone);
    let total_hours = daily_reports.iter().map(|d| d.total_hours).sum();

    let report = WeeklyReport {
        user_id: subject.user_id,
        user_name: subject.user_name,
        user_email: subject.user_email,
        start_date: start,
        end_date: end,
        daily_reports,
        total_hours,
    };

    apply_day_policy(report, policy)
}

/// Bring any weekly report (client-built or fetched) to the given policy.
/// Totals are untouched: empty days carry zero hours.
pub fn apply_day_policy(mut report: WeeklyReport, policy: DayPolicy) -> WeeklyReport {
    report.daily_reports = match policy {
        DayPolicy::Sparse => report
            .daily_reports
            .into_iter()
            .filter(|d| !d.sessions.is_empty())
            .collect(),
        DayPolicy::Dense => fill_empty_days(report.daily_reports, report.start_date, report.end_date),
    };
    report
}

fn fill_empty_days(sparse: Vec<DailyReport>, start: NaiveDate, end: NaiveDate) -> Vec<DailyReport> {
    let mut by_day: BTreeMap<NaiveDate, DailyReport> =
        sparse.into_iter().map(|d| (d.date, d)).collect();

    let mut days: Vec<DailyReport> = days_in_range(start, end)
        .into_iter()
        .map(|day| by_day.remove(&day).unwrap_or_else(|| DailyReport::empty(day)))
        .collect();

    // out-of-range days reported by a server are kept, not silently lost
    days.extend(by_day.into_values());
    days.sort_by_key(|d| d.date);
    days
}
