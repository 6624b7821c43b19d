use crate::api::MarkStore;
use crate::core::calculator::report::{self, DayPolicy, ReportSubject};
use crate::core::calculator::summary;
use crate::errors::{AppError, AppResult};
use crate::models::id::Id;
use crate::models::mark::Mark;
use crate::models::report::{EmployeesSummary, WeeklyReport};
use crate::models::user::User;
use crate::utils::time::browser_offset_minutes;
use chrono::{FixedOffset, NaiveDate};
use tracing::info;

/// Where a weekly report is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// `GET /marks/weekly-report/{user}`: aggregated by the server.
    Server,
    /// Aggregated here from `/marks/my-marks`.
    Local,
}

#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// `None` means the authenticated user.
    pub user_id: Option<Id>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub zone: FixedOffset,
    pub policy: DayPolicy,
    pub source: ReportSource,
}

impl ReportRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.start > self.end {
            return Err(AppError::Validation(format!(
                "Start date {} is after end date {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

pub struct Core;

impl Core {
    /// The authenticated user, provided they are an administrator.
    pub fn require_admin(store: &impl MarkStore) -> AppResult<User> {
        let me = store.current_user()?;
        if !me.is_superuser {
            return Err(AppError::Validation(format!(
                "{} is not an administrator: this command is for admins only",
                me.display_name()
            )));
        }
        Ok(me)
    }

    pub fn weekly_report(store: &impl MarkStore, req: &ReportRequest) -> AppResult<WeeklyReport> {
        req.validate()?;

        match req.source {
            ReportSource::Server => {
                let user_id = match &req.user_id {
                    Some(id) => id.clone(),
                    None => store.current_user()?.id,
                };
                info!(user = %user_id, start = %req.start, end = %req.end, "server weekly report");

                let fetched = store.weekly_report(
                    &user_id,
                    req.start,
                    req.end,
                    browser_offset_minutes(&req.zone),
                )?;
                Ok(report::apply_day_policy(fetched, req.policy))
            }
            ReportSource::Local => {
                let me = store.current_user()?;
                if let Some(id) = &req.user_id
                    && *id != me.id
                {
                    return Err(AppError::Validation(format!(
                        "Local reports only cover your own marks (requested user {id}, logged in as {})",
                        me.id
                    )));
                }
                info!(user = %me.id, start = %req.start, end = %req.end, "local weekly report");

                let marks = store.my_marks()?;
                let subject = ReportSubject {
                    user_id: me.id.clone(),
                    user_name: Some(me.display_name()),
                    user_email: Some(me.email.clone()),
                };
                Ok(report::build_weekly_report(
                    subject, &marks, req.start, req.end, &req.zone, req.policy,
                ))
            }
        }
    }

    /// Weekly report from marks loaded elsewhere (a JSON export).
    ///
    /// Without an explicit user the marks must all belong to one user.
    pub fn weekly_report_from_marks(
        marks: &[Mark],
        user_id: Option<Id>,
        req: &ReportRequest,
    ) -> AppResult<WeeklyReport> {
        req.validate()?;

        let user_id = match user_id {
            Some(id) => id,
            None => single_owner(marks)?,
        };

        Ok(report::build_weekly_report(
            ReportSubject::new(user_id),
            marks,
            req.start,
            req.end,
            &req.zone,
            req.policy,
        ))
    }

    /// Hours per active employee over the period, from server reports.
    pub fn employees_summary(
        store: &impl MarkStore,
        start: NaiveDate,
        end: NaiveDate,
        zone: &FixedOffset,
    ) -> AppResult<EmployeesSummary> {
        if start > end {
            return Err(AppError::Validation(format!(
                "Start date {start} is after end date {end}"
            )));
        }

        let offset = browser_offset_minutes(zone);
        let mut entries = Vec::new();

        for user in store.list_users()?.into_iter().filter(|u| u.is_active) {
            let report = store.weekly_report(&user.id, start, end, offset)?;
            entries.push((user, report));
        }

        info!(employees = entries.len(), "employees summary built");
        Ok(summary::build_summary(start, end, &entries))
    }
}

fn single_owner(marks: &[Mark]) -> AppResult<Id> {
    let mut owners: Vec<&Id> = marks.iter().map(|m| &m.user_id).collect();
    owners.sort();
    owners.dedup();

    match owners.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(AppError::Validation(
            "No marks found: cannot tell whose report this is".to_string(),
        )),
        _ => Err(AppError::Validation(format!(
            "Marks belong to {} users: pick one with --user",
            owners.len()
        ))),
    }
}
