#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rclockmarks::models::id::Id;
use rclockmarks::models::mark::Mark;
use rclockmarks::models::mark_type::MarkType;
use rclockmarks::utils::time::to_zoned_instant;
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, isolated from the developer's own session and config.
pub fn rcm() -> Command {
    let mut cmd = cargo_bin_cmd!("rclockmarks");
    cmd.env_remove("RCLOCKMARKS_TOKEN")
        .env_remove("RCLOCKMARKS_API_URL")
        .env_remove("RCLOCKMARKS_PASSWORD")
        .env_remove("RCLOCKMARKS_LOG");
    cmd
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rclockmarks_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Config file path for a test, removed beforehand.
pub fn temp_config(name: &str) -> String {
    temp_out(&format!("{name}_config"), "conf")
}

/// A mark at `ts` (any accepted timestamp form) for `user`.
pub fn mark(id: i64, user: i64, kind: MarkType, ts: &str) -> Mark {
    Mark {
        id: Id::from(id),
        user_id: Id::from(user),
        mark_type: kind,
        timestamp: to_zoned_instant(ts).expect("valid test timestamp"),
        latitude: 40.0,
        longitude: -74.0,
        po_number: None,
        address: None,
    }
}

pub fn clock_in(id: i64, ts: &str) -> Mark {
    mark(id, 1, MarkType::ClockIn, ts)
}

pub fn clock_out(id: i64, ts: &str) -> Mark {
    mark(id, 1, MarkType::ClockOut, ts)
}

pub fn with_po(mut m: Mark, po: &str) -> Mark {
    m.po_number = Some(po.to_string());
    m
}

/// Marks in the Mark Store wire format (naive UTC timestamps, integer ids).
pub const WEEK_MARKS_JSON: &str = r#"[
  {"id": 6, "user_id": 7, "mark_type": "clock_out", "timestamp": "2024-01-09T17:00:00",
   "latitude": 40.7, "longitude": -74.0, "po_number": "PO-2", "address": "12 Main St"},
  {"id": 5, "user_id": 7, "mark_type": "clock_in", "timestamp": "2024-01-09T13:00:00",
   "latitude": 40.7, "longitude": -74.0, "po_number": "PO-2", "address": "12 Main St"},
  {"id": 4, "user_id": 7, "mark_type": "clock_out", "timestamp": "2024-01-08T12:00:00",
   "latitude": 40.7, "longitude": -74.0, "po_number": "PO-1", "address": null},
  {"id": 3, "user_id": 7, "mark_type": "clock_in", "timestamp": "2024-01-08T08:00:00",
   "latitude": 40.7, "longitude": -74.0, "po_number": "PO-1", "address": null},
  {"id": 2, "user_id": 7, "mark_type": "clock_out", "timestamp": "2024-01-06T16:30:00Z",
   "latitude": 40.7, "longitude": -74.0},
  {"id": 1, "user_id": 7, "mark_type": "clock_in", "timestamp": "2024-01-06T08:00:00Z",
   "latitude": 40.7, "longitude": -74.0}
]"#;

/// Write [`WEEK_MARKS_JSON`] to a temp file and return its path.
pub fn week_marks_file(name: &str) -> String {
    let p = temp_out(name, "json");
    fs::write(&p, WEEK_MARKS_JSON).expect("write marks file");
    p
}
