use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::ExportTable;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// XLSX with title block, banded rows, bold total and auto column widths.
pub(crate) fn export_xlsx(table: &ExportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // ---------------------------
    // Title block
    // ---------------------------
    let title_format = Format::new().set_bold().set_font_size(14);
    worksheet
        .write_with_format(0, 0, table.title.as_str(), &title_format)
        .map_err(to_app_error)?;

    let mut row: u32 = 1;
    for line in &table.subtitle {
        worksheet.write(row, 0, line.as_str()).map_err(to_app_error)?;
        row += 1;
    }
    row += 1;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F5496))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_with_format(row, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }
    worksheet.set_freeze_panes(row + 1, 0).map_err(to_app_error)?;
    row += 1;

    let mut col_widths: Vec<usize> = table
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    // ---------------------------
    // Rows
    // ---------------------------
    let band1 = Color::RGB(0xF5F5F5);
    let band2 = Color::RGB(0xFFFFFF);

    for (i, values) in table.rows.iter().enumerate() {
        let bg = if i % 2 == 0 { band1 } else { band2 };
        write_row(worksheet, row, values, bg, false, &mut col_widths)?;
        row += 1;
    }

    if let Some(total) = &table.total {
        write_row(
            worksheet,
            row,
            total,
            Color::RGB(0xF0F0F0),
            true,
            &mut col_widths,
        )?;
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    values: &[String],
    bg: Color,
    bold: bool,
    col_widths: &mut [usize],
) -> AppResult<()> {
    for (col, value) in values.iter().enumerate() {
        write_cell(worksheet, row, col as u16, value, bg, bold)?;
        if let Some(w) = col_widths.get_mut(col) {
            *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
        }
    }
    Ok(())
}

/// Dates become Excel dates, decimal hours become right-aligned numbers, the
/// rest stays text (PO numbers keep their leading zeros).
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    bold: bool,
) -> AppResult<()> {
    let mut fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    if bold {
        fmt = fmt.set_bold();
    }

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        worksheet
            .write_with_format(row, col, serial, &fmt.set_num_format(num_format))
            .map_err(to_app_error)?;
        return Ok(());
    }

    if s.contains('.')
        && let Ok(num) = s.parse::<f64>()
    {
        let fmt = fmt.set_align(FormatAlign::Right).set_num_format("0.00");
        worksheet
            .write_with_format(row, col, num, &fmt)
            .map_err(to_app_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col, s, &fmt)
        .map_err(to_app_error)?;
    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
