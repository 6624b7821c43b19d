use crate::cli::commands::{client, resolve_period, resolve_zone};
use crate::cli::parser::{Commands, PeriodArgs};
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::models::report::EmployeesSummary;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_optional, colorize_total};
use crate::utils::date::long_date;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { period } = cmd {
        let summary = load(period, cfg)?;
        print_summary(&summary);
    }
    Ok(())
}

pub(crate) fn load(period: &PeriodArgs, cfg: &Config) -> AppResult<EmployeesSummary> {
    let (start, end) = resolve_period(period, cfg)?;
    let zone = resolve_zone(period, cfg)?;
    let store = client(cfg)?;
    Core::require_admin(&store)?;
    Core::employees_summary(&store, start, end, &zone)
}

fn print_summary(summary: &EmployeesSummary) {
    header(format!(
        "Employees Hours Summary | {} → {}",
        long_date(summary.start_date),
        long_date(summary.end_date)
    ));

    if summary.employees.is_empty() {
        info("No active employees.");
        return;
    }

    let mut table = Table::new(vec![
        Column::left("EMPLOYEE").max(32),
        Column::left("EMAIL").max(40),
        Column::right("HOURS"),
    ]);
    for e in &summary.employees {
        table.add_row(vec![
            e.user_name.clone(),
            e.user_email.clone(),
            colorize_optional(&format_hours(e.total_hours)),
        ]);
    }
    table.add_row(vec![
        String::new(),
        "TOTAL".to_string(),
        colorize_total(summary.total_hours, &format_hours(summary.total_hours)),
    ]);

    print!("{}", table.render());
}
