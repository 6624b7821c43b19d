use crate::api::MarkStore;
use crate::cli::commands::{ask_confirmation, client};
use crate::cli::parser::{ClockKind, Commands, MarksCommand};
use crate::config::Config;
use crate::core::calculator::sessions::reconstruct;
use crate::core::marks::MarkLogic;
use crate::errors::AppResult;
use crate::models::id::Id;
use crate::models::mark::Mark;
use crate::models::mark_type::MarkType;
use crate::models::payload::MarkUpdate;
use crate::ui::messages::{info, success};
use crate::utils::colors::{colorize_mark, colorize_open, colorize_optional};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_hours, to_zoned_instant};
use chrono::FixedOffset;

fn mark_type(kind: ClockKind) -> MarkType {
    match kind {
        ClockKind::In => MarkType::ClockIn,
        ClockKind::Out => MarkType::ClockOut,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Marks { command } = cmd else {
        return Ok(());
    };

    let store = client(cfg)?;
    let zone = cfg.viewer_zone()?;

    match command {
        MarksCommand::List { sessions } => {
            let marks = store.my_marks()?;
            if marks.is_empty() {
                info("No marks recorded yet.");
            } else if *sessions {
                print!("{}", sessions_table(&marks, &zone).render());
            } else {
                print!("{}", marks_table(&marks, &zone).render());
            }
        }

        MarksCommand::Create {
            user,
            kind,
            at,
            lat,
            lon,
            po,
        } => {
            let mark = MarkLogic::new_mark(
                Id::from(user.as_str()),
                mark_type(*kind),
                to_zoned_instant(at)?,
                *lat,
                *lon,
                po.clone(),
            )?;
            let created = store.create_mark(&mark)?;
            success(format!(
                "Mark #{} created: {} at {}",
                created.id,
                created.mark_type.label(),
                created.local_time_str(&zone)
            ));
        }

        MarksCommand::AddSession {
            user,
            clock_in,
            clock_out,
            lat,
            lon,
            po,
        } => {
            let (mark_in, mark_out) = MarkLogic::new_session(
                Id::from(user.as_str()),
                to_zoned_instant(clock_in)?,
                to_zoned_instant(clock_out)?,
                *lat,
                *lon,
                po.clone(),
            )?;
            let (created_in, created_out) = MarkLogic::add_session(&store, &mark_in, &mark_out)?;
            success(format!(
                "Session added: #{} {} → #{} {}",
                created_in.id,
                created_in.local_time_str(&zone),
                created_out.id,
                created_out.local_time_str(&zone)
            ));
        }

        MarksCommand::Update {
            id,
            kind,
            at,
            lat,
            lon,
            po,
        } => {
            let update = MarkLogic::update(MarkUpdate {
                mark_type: kind.map(mark_type),
                timestamp: at.as_deref().map(to_zoned_instant).transpose()?,
                latitude: *lat,
                longitude: *lon,
                po_number: po.clone(),
            })?;
            let updated = store.update_mark(&Id::from(id.as_str()), &update)?;
            success(format!(
                "Mark #{} updated: {} at {}",
                updated.id,
                updated.mark_type.label(),
                updated.local_time_str(&zone)
            ));
        }

        MarksCommand::Delete { id, force } => {
            let prompt = format!("Delete mark #{id}? This action is irreversible.");
            if !*force && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
            store.delete_mark(&Id::from(id.as_str()))?;
            success(format!("Mark #{id} has been deleted."));
        }
    }

    Ok(())
}

/// Marks newest first.
fn marks_table(marks: &[Mark], zone: &FixedOffset) -> Table {
    let mut sorted: Vec<&Mark> = marks.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("TYPE"),
        Column::left("TIME"),
        Column::left("PO"),
        Column::left("ADDRESS").max(48),
    ]);
    for m in sorted {
        table.add_row(vec![
            m.id.to_string(),
            colorize_mark(m.mark_type.label(), m.mark_type),
            m.local_time_str(zone),
            colorize_optional(&or_dash(m.po())),
            or_dash(m.address.as_deref()),
        ]);
    }
    table
}

/// Reconstructed sessions, newest first.
fn sessions_table(marks: &[Mark], zone: &FixedOffset) -> Table {
    let mut sessions = reconstruct(marks);
    sessions.reverse();

    let mut table = Table::new(vec![
        Column::left("CLOCK IN"),
        Column::left("CLOCK OUT"),
        Column::left("PO"),
        Column::right("HOURS"),
    ]);
    for s in &sessions {
        let out = match &s.clock_out {
            Some(m) => m.local_time_str(zone),
            None => colorize_open("open"),
        };
        table.add_row(vec![
            s.clock_in.local_time_str(zone),
            out,
            colorize_optional(&or_dash(s.clock_in.po())),
            colorize_optional(&format_hours(s.hours_worked)),
        ]);
    }
    table
}
