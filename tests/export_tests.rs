mod common;
use chrono::NaiveDate;
use common::{WEEK_MARKS_JSON, temp_out};
use rclockmarks::core::calculator::report::{DayPolicy, ReportSubject, build_weekly_report};
use rclockmarks::core::calculator::summary::build_summary;
use rclockmarks::errors::AppError;
use rclockmarks::export::model::{summary_table, weekly_table};
use rclockmarks::export::{ExportFormat, ExportLogic};
use rclockmarks::models::id::Id;
use rclockmarks::models::mark::Mark;
use rclockmarks::models::report::{EmployeesSummary, WeeklyReport};
use rclockmarks::models::user::User;
use rclockmarks::utils::time::viewer_zone;
use std::fs;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn week_report(policy: DayPolicy) -> WeeklyReport {
    let marks: Vec<Mark> = serde_json::from_str(WEEK_MARKS_JSON).unwrap();
    build_weekly_report(
        ReportSubject {
            user_id: Id::from(7),
            user_name: Some("Ana Diaz".into()),
            user_email: Some("ana@example.com".into()),
        },
        &marks,
        d("2024-01-06"),
        d("2024-01-12"),
        &viewer_zone(0).unwrap(),
        policy,
    )
}

fn summary() -> EmployeesSummary {
    let user = |id: i64, first: &str, email: &str| User {
        id: Id::from(id),
        email: email.to_string(),
        first_name: Some(first.to_string()),
        last_name: Some("Diaz".to_string()),
        is_superuser: false,
        is_active: true,
    };
    let report = week_report(DayPolicy::Sparse);
    let mut other = report.clone();
    other.total_hours = 2.25;

    build_summary(
        d("2024-01-06"),
        d("2024-01-12"),
        &[
            (user(7, "Ana", "ana@example.com"), report),
            (user(8, "Luis", "luis@example.com"), other),
        ],
    )
}

#[test]
fn test_weekly_table_rows_and_total() {
    let table = weekly_table(&week_report(DayPolicy::Sparse), &viewer_zone(0).unwrap());

    assert_eq!(table.title, "Weekly Hours Report");
    assert_eq!(table.rows.len(), 3);
    assert_eq!(
        table.rows[1],
        vec![
            "2024-01-08",
            "2024-01-08 08:00",
            "2024-01-08 12:00",
            "PO-1",
            "",
            "",
            "4.00"
        ]
    );
    let total = table.total.as_ref().unwrap();
    assert_eq!(total[0], "TOTAL");
    assert_eq!(total[6], "16.50");
    assert!(table.subtitle.iter().any(|l| l.contains("Saturday, January 6, 2024")));
}

#[test]
fn test_weekly_table_shows_viewer_local_times() {
    let table = weekly_table(&week_report(DayPolicy::Sparse), &viewer_zone(-300).unwrap());
    assert_eq!(table.rows[0][1], "2024-01-06 03:00");
}

#[test]
fn test_dense_table_has_empty_days() {
    let table = weekly_table(&week_report(DayPolicy::Dense), &viewer_zone(0).unwrap());
    assert_eq!(table.rows.len(), 7);
    assert_eq!(table.rows[1][0], "2024-01-07");
    assert_eq!(table.rows[1][6], "0.00");
}

#[test]
fn test_summary_table() {
    let table = summary_table(&summary());
    assert_eq!(table.title, "Employees Hours Summary");
    assert_eq!(table.subtitle[0], "From: Saturday, January 6, 2024");
    assert_eq!(table.subtitle[1], "To: Friday, January 12, 2024");
    assert_eq!(table.rows[0], vec!["Ana Diaz", "ana@example.com", "16.50"]);
    assert_eq!(table.total.as_ref().unwrap()[2], "18.75");
}

#[test]
fn test_export_weekly_csv() {
    let out = temp_out("export_weekly_csv", "csv");
    let report = week_report(DayPolicy::Sparse);

    ExportLogic::export_weekly(&report, &viewer_zone(0).unwrap(), ExportFormat::Csv, &out, true)
        .unwrap();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "date,clock_in,clock_out,po_number,clock_in_address,clock_out_address,hours"
    );
    assert!(lines[3].contains("12 Main St"));
    assert_eq!(lines.last().copied(), Some("TOTAL,,,,,,16.50"));
}

#[test]
fn test_export_weekly_json_is_structured() {
    let out = temp_out("export_weekly_json", "json");
    let report = week_report(DayPolicy::Sparse);

    ExportLogic::export_weekly(&report, &viewer_zone(0).unwrap(), ExportFormat::Json, &out, true)
        .unwrap();

    let back: WeeklyReport =
        serde_json::from_str(&fs::read_to_string(&out).expect("read exported json")).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_export_summary_pdf_and_xlsx() {
    let pdf = temp_out("export_summary_pdf", "pdf");
    let xlsx = temp_out("export_summary_xlsx", "xlsx");
    let s = summary();

    ExportLogic::export_summary(&s, ExportFormat::Pdf, &pdf, true).unwrap();
    ExportLogic::export_summary(&s, ExportFormat::Xlsx, &xlsx, true).unwrap();

    let pdf_bytes = fs::read(&pdf).unwrap();
    assert!(pdf_bytes.starts_with(b"%PDF"));
    let text = String::from_utf8_lossy(&pdf_bytes);
    assert!(text.contains("Employees Hours Summary"));

    let xlsx_bytes = fs::read(&xlsx).unwrap();
    assert!(xlsx_bytes.starts_with(b"PK"));
}

#[test]
fn test_export_long_weekly_pdf_spans_pages() {
    let pdf = temp_out("export_weekly_pdf_pages", "pdf");
    let mut report = week_report(DayPolicy::Sparse);
    let day = report.daily_reports[0].clone();
    for _ in 0..60 {
        report.daily_reports.push(day.clone());
    }

    ExportLogic::export_weekly(&report, &viewer_zone(0).unwrap(), ExportFormat::Pdf, &pdf, true)
        .unwrap();

    let text = String::from_utf8_lossy(&fs::read(&pdf).unwrap()).to_string();
    assert!(text.contains("(Page 2)"));
}

#[test]
fn test_relative_output_path_is_rejected() {
    let err = ExportLogic::export_summary(&summary(), ExportFormat::Csv, "relative/out.csv", true)
        .unwrap_err();
    assert!(matches!(err, AppError::Export(_)));
}

#[test]
fn test_export_format_parse() {
    assert_eq!(ExportFormat::parse("XLSX").unwrap(), ExportFormat::Xlsx);
    assert!(ExportFormat::parse("docx").is_err());
}
