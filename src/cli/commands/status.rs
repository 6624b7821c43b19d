use crate::api::MarkStore;
use crate::cli::commands::client;
use crate::config::Config;
use crate::core::clock::ClockState;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{colorize_mark, colorize_open};
use crate::utils::formatting::or_dash;
use crate::utils::time::{format_hours, hours_between};
use chrono::Utc;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let zone = cfg.viewer_zone()?;
    let marks = client(cfg)?.my_marks()?;

    match ClockState::from_marks(&marks) {
        ClockState::ClockedIn { since } => {
            let hours = hours_between(since.timestamp, Utc::now());
            println!(
                "{} since {} (PO {}), {} h so far",
                colorize_open("Clocked in"),
                since.local_time_str(&zone),
                or_dash(since.po()),
                format_hours(hours)
            );
        }
        ClockState::ClockedOut { last: Some(last) } => {
            println!(
                "Clocked out. Last mark: {} at {}",
                colorize_mark(last.mark_type.label(), last.mark_type),
                last.local_time_str(&zone)
            );
        }
        ClockState::ClockedOut { last: None } => info("No marks recorded yet."),
    }
    Ok(())
}
