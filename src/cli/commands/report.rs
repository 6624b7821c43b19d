use crate::cli::commands::{client, report_request};
use crate::cli::parser::{Commands, ReportArgs};
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::models::mark::Mark;
use crate::models::report::WeeklyReport;
use crate::models::session::Session;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_open, colorize_optional, colorize_total};
use crate::utils::date::long_date;
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_hours, hours2readable};
use chrono::FixedOffset;
use std::fs;
use tracing::debug;

/// Handle the `report` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { args } = cmd {
        let (report, zone) = load(args, cfg)?;
        print_report(&report, &zone);
    }
    Ok(())
}

/// Weekly report selected by `args`, with the zone it is bucketed in.
pub(crate) fn load(args: &ReportArgs, cfg: &Config) -> AppResult<(WeeklyReport, FixedOffset)> {
    let req = report_request(args, cfg)?;

    let report = match &args.marks_file {
        Some(file) => {
            let content = fs::read_to_string(file)?;
            let marks: Vec<Mark> = serde_json::from_str(&content)?;
            debug!(file = %file, marks = marks.len(), "marks loaded from file");
            Core::weekly_report_from_marks(&marks, req.user_id.clone(), &req)?
        }
        None => Core::weekly_report(&client(cfg)?, &req)?,
    };

    Ok((report, req.zone))
}

fn time_of(session: &Session, zone: &FixedOffset) -> (String, String) {
    let start = session.clock_in.timestamp.with_timezone(zone);
    let clock_in = start.format("%H:%M").to_string();

    let clock_out = match &session.clock_out {
        Some(m) => {
            let end = m.timestamp.with_timezone(zone);
            let days = (end.date_naive() - start.date_naive()).num_days();
            if days > 0 {
                format!("{} (+{days})", end.format("%H:%M"))
            } else {
                end.format("%H:%M").to_string()
            }
        }
        None => colorize_open("open"),
    };

    (clock_in, clock_out)
}

pub(crate) fn print_report(report: &WeeklyReport, zone: &FixedOffset) {
    header(format!(
        "{} | {} → {} (UTC{})",
        report.display_name(),
        long_date(report.start_date),
        long_date(report.end_date),
        zone
    ));

    if report.daily_reports.is_empty() {
        info("No sessions in this period.");
        return;
    }

    let mut table = Table::new(vec![
        Column::left("DATE"),
        Column::left("IN"),
        Column::left("OUT"),
        Column::left("PO"),
        Column::left("ADDRESS").max(40),
        Column::right("HOURS"),
    ]);

    for day in &report.daily_reports {
        let date = day.date.format("%a %Y-%m-%d").to_string();

        if day.sessions.is_empty() {
            table.add_row(vec![
                date,
                colorize_optional("--:--"),
                colorize_optional("--:--"),
                colorize_optional("--"),
                String::new(),
                colorize_optional(&format_hours(0.0)),
            ]);
            continue;
        }

        for (i, s) in day.sessions.iter().enumerate() {
            let (clock_in, clock_out) = time_of(s, zone);
            table.add_row(vec![
                if i == 0 { date.clone() } else { String::new() },
                clock_in,
                clock_out,
                colorize_optional(&or_dash(s.clock_in.po())),
                or_dash(s.clock_in.address.as_deref()),
                format_hours(s.hours_worked),
            ]);
        }

        if day.sessions.len() > 1 {
            table.add_row(vec![
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                "day total".to_string(),
                colorize_total(day.total_hours, &format_hours(day.total_hours)),
            ]);
        }
    }

    print!("{}", table.render());
    println!();
    println!(
        "TOTAL: {} h ({}) in {} session(s)",
        colorize_total(report.total_hours, &format_hours(report.total_hours)),
        hours2readable(report.total_hours),
        report.session_count()
    );
}

