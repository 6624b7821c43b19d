use crate::api::MarkStore;
use crate::cli::commands::client;
use crate::cli::parser::{ClockKind, Commands};
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::errors::AppResult;
use crate::models::mark_type::MarkType;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::or_dash;

/// Handle `clock in` / `clock out`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock { kind, lat, lon, po } = cmd {
        let kind = match kind {
            ClockKind::In => MarkType::ClockIn,
            ClockKind::Out => MarkType::ClockOut,
        };

        let store = client(cfg)?;
        let zone = cfg.viewer_zone()?;

        // clock-out needs to know the open session and its PO
        let marks = match kind {
            MarkType::ClockIn => Vec::new(),
            MarkType::ClockOut => store.my_marks()?,
        };

        let plan = ClockLogic::plan(kind, &marks, *lat, *lon, po.clone())?;
        if plan.po_overridden {
            warning(format!(
                "Clock-out keeps the PO of the open clock-in ({}).",
                or_dash(plan.payload.po_number.as_deref())
            ));
        }

        let mark = match plan.kind {
            MarkType::ClockIn => store.clock_in(&plan.payload)?,
            MarkType::ClockOut => store.clock_out(&plan.payload)?,
        };

        success(format!(
            "{} recorded at {} (PO {})",
            mark.mark_type.label(),
            mark.local_time_str(&zone),
            or_dash(mark.po())
        ));
        if let Some(address) = mark.address.as_deref().filter(|a| !a.trim().is_empty()) {
            println!("   {address}");
        }
    }
    Ok(())
}
