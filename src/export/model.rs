//! Flat, format-independent view of a report: header lines plus a table.

use crate::models::report::{EmployeesSummary, WeeklyReport};
use crate::utils::date::long_date;
use crate::utils::time::format_hours;
use chrono::FixedOffset;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub title: String,
    /// Lines printed under the title (period, employee, ...).
    pub subtitle: Vec<String>,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Emphasized last row.
    pub total: Option<Vec<String>>,
}

impl ExportTable {
    /// Data rows followed by the total row, if any.
    pub fn all_rows(&self) -> Vec<Vec<String>> {
        let mut rows = self.rows.clone();
        if let Some(total) = &self.total {
            rows.push(total.clone());
        }
        rows
    }
}

pub(crate) const WEEKLY_HEADERS: [&str; 7] = [
    "date",
    "clock_in",
    "clock_out",
    "po_number",
    "clock_in_address",
    "clock_out_address",
    "hours",
];

pub(crate) const SUMMARY_HEADERS: [&str; 3] = ["employee_name", "email", "total_hours"];

/// One row per session, instants shown in `zone`.
pub fn weekly_table(report: &WeeklyReport, zone: &FixedOffset) -> ExportTable {
    let mut rows = Vec::new();

    for day in &report.daily_reports {
        if day.sessions.is_empty() {
            rows.push(vec![
                day.date.format("%Y-%m-%d").to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                format_hours(0.0),
            ]);
            continue;
        }

        for s in &day.sessions {
            let po = s
                .clock_in
                .po()
                .or_else(|| s.clock_out.as_ref().and_then(|m| m.po()))
                .unwrap_or("");

            rows.push(vec![
                day.date.format("%Y-%m-%d").to_string(),
                s.clock_in.local_time_str(zone),
                s.clock_out
                    .as_ref()
                    .map(|m| m.local_time_str(zone))
                    .unwrap_or_default(),
                po.to_string(),
                s.clock_in.address.clone().unwrap_or_default(),
                s.clock_out
                    .as_ref()
                    .and_then(|m| m.address.clone())
                    .unwrap_or_default(),
                format_hours(s.hours_worked),
            ]);
        }
    }

    let mut total = vec![String::new(); WEEKLY_HEADERS.len()];
    total[0] = "TOTAL".to_string();
    total[WEEKLY_HEADERS.len() - 1] = format_hours(report.total_hours);

    let mut subtitle = vec![report.display_name()];
    if let (Some(email), Some(_)) = (&report.user_email, &report.user_name) {
        subtitle.push(email.clone());
    }
    subtitle.push(format!(
        "Period: {} - {}",
        long_date(report.start_date),
        long_date(report.end_date)
    ));

    ExportTable {
        title: "Weekly Hours Report".to_string(),
        subtitle,
        headers: WEEKLY_HEADERS.to_vec(),
        rows,
        total: Some(total),
    }
}

pub fn summary_table(summary: &EmployeesSummary) -> ExportTable {
    let rows = summary
        .employees
        .iter()
        .map(|e| {
            vec![
                e.user_name.clone(),
                e.user_email.clone(),
                format_hours(e.total_hours),
            ]
        })
        .collect();

    ExportTable {
        title: "Employees Hours Summary".to_string(),
        subtitle: vec![
            format!("From: {}", long_date(summary.start_date)),
            format!("To: {}", long_date(summary.end_date)),
        ],
        headers: SUMMARY_HEADERS.to_vec(),
        rows,
        total: Some(vec![
            String::new(),
            "TOTAL".to_string(),
            format_hours(summary.total_hours),
        ]),
    }
}
