use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ExportTable, summary_table, weekly_table};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::report::{EmployeesSummary, WeeklyReport};
use crate::utils::path::absolute_output;
use chrono::FixedOffset;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// High-level export entry points.
pub struct ExportLogic;

impl ExportLogic {
    /// Export a weekly report; instants are rendered in `zone`.
    pub fn export_weekly(
        report: &WeeklyReport,
        zone: &FixedOffset,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = prepare(file, force)?;
        write(report, &weekly_table(report, zone), format, &path)?;
        Ok(path)
    }

    pub fn export_summary(
        summary: &EmployeesSummary,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = prepare(file, force)?;
        write(summary, &summary_table(summary), format, &path)?;
        Ok(path)
    }
}

fn prepare(file: &str, force: bool) -> AppResult<PathBuf> {
    let path = absolute_output(file)?;
    ensure_writable(&path, force)?;
    Ok(path)
}

fn write<T: Serialize>(
    data: &T,
    table: &ExportTable,
    format: ExportFormat,
    path: &Path,
) -> AppResult<()> {
    match format {
        ExportFormat::Json => export_json(data, path),
        ExportFormat::Csv => export_csv(table, path),
        ExportFormat::Xlsx => export_xlsx(table, path),
        ExportFormat::Pdf => export_pdf(table, path),
    }
}
