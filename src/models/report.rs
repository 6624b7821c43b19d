use super::{id::Id, session::Session};
use crate::utils::time;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyReport {
    #[serde(deserialize_with = "time::deserialize_calendar_date")]
    pub date: NaiveDate,
    pub sessions: Vec<Session>,
    pub total_hours: f64,
}

impl DailyReport {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sessions: Vec::new(),
            total_hours: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyReport {
    pub user_id: Id,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(deserialize_with = "time::deserialize_calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "time::deserialize_calendar_date")]
    pub end_date: NaiveDate,
    pub daily_reports: Vec<DailyReport>,
    pub total_hours: f64,
}

impl WeeklyReport {
    pub fn session_count(&self) -> usize {
        self.daily_reports.iter().map(|d| d.sessions.len()).sum()
    }

    /// Name shown in report headers: user name, then email, then the raw id.
    pub fn display_name(&self) -> String {
        self.user_name
            .clone()
            .or_else(|| self.user_email.clone())
            .unwrap_or_else(|| format!("User {}", self.user_id))
    }
}

/// One row of the employees summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeHours {
    pub user_id: Id,
    pub user_name: String,
    pub user_email: String,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeesSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub employees: Vec<EmployeeHours>,
    pub total_hours: f64,
}
