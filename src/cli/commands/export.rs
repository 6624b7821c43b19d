use crate::cli::commands::{report, summary};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic, ReportKind};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        report: kind,
        format,
        file,
        force,
        args,
    } = cmd
    {
        let format = match format {
            Some(f) => *f,
            None => ExportFormat::parse(&cfg.default_export_format)?,
        };

        match kind {
            ReportKind::Weekly => {
                let (report, zone) = report::load(args, cfg)?;
                if report.daily_reports.is_empty() {
                    info("No sessions in this period: exporting an empty report.");
                }
                ExportLogic::export_weekly(&report, &zone, format, file, *force)?;
            }
            ReportKind::Summary => {
                let summary = summary::load(&args.period, cfg)?;
                ExportLogic::export_summary(&summary, format, file, *force)?;
            }
        }
    }
    Ok(())
}
