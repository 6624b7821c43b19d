mod common;
use common::{clock_in, clock_out};
use rclockmarks::core::calculator::report::aggregate;
use rclockmarks::core::calculator::sessions::reconstruct;
use rclockmarks::models::mark::Mark;
use rclockmarks::utils::time::viewer_zone;

#[test]
fn test_single_pair_hours() {
    let marks = vec![
        clock_in(1, "2024-01-01T08:00:00Z"),
        clock_out(2, "2024-01-01T16:30:00Z"),
    ];

    let sessions = reconstruct(&marks);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].hours_worked, 8.5);
    assert_eq!(sessions[0].clock_in.id.as_str(), "1");
    assert_eq!(
        sessions[0].clock_out.as_ref().map(|m| m.id.as_str()),
        Some("2")
    );
}

#[test]
fn test_alternating_pairs_one_session_each() {
    let marks = vec![
        clock_in(1, "2024-01-01T08:00:00Z"),
        clock_out(2, "2024-01-01T12:00:00Z"),
        clock_in(3, "2024-01-01T12:45:00Z"),
        clock_out(4, "2024-01-01T17:15:00Z"),
        clock_in(5, "2024-01-02T07:30:00Z"),
        clock_out(6, "2024-01-02T07:50:00Z"),
    ];

    let sessions = reconstruct(&marks);
    let hours: Vec<f64> = sessions.iter().map(|s| s.hours_worked).collect();
    assert_eq!(hours.len(), 3);
    assert_eq!(hours[0], 4.0);
    assert_eq!(hours[1], 4.5);
    assert!((hours[2] - 20.0 / 60.0).abs() < 1e-12);
    assert!(sessions.iter().all(|s| !s.is_open()));
}

#[test]
fn test_lone_clock_in_stays_open() {
    let sessions = reconstruct(&[clock_in(1, "2024-01-01T08:00:00Z")]);

    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].clock_out.is_none());
    assert_eq!(sessions[0].hours_worked, 0.0);
}

#[test]
fn test_second_clock_in_closes_previous_session() {
    let marks = vec![
        clock_in(1, "2024-01-01T08:00:00Z"),
        clock_in(2, "2024-01-02T08:00:00Z"),
        clock_out(3, "2024-01-02T10:00:00Z"),
    ];

    let sessions = reconstruct(&marks);
    assert_eq!(sessions.len(), 2);

    assert_eq!(sessions[0].clock_in.id.as_str(), "1");
    assert!(sessions[0].clock_out.is_none());
    assert_eq!(sessions[0].hours_worked, 0.0);

    assert_eq!(sessions[1].clock_in.id.as_str(), "2");
    assert_eq!(sessions[1].hours_worked, 2.0);
}

#[test]
fn test_orphan_clock_out_is_dropped() {
    assert!(reconstruct(&[clock_out(1, "2024-01-01T08:00:00Z")]).is_empty());

    let marks = vec![
        clock_out(1, "2024-01-01T07:00:00Z"),
        clock_in(2, "2024-01-01T08:00:00Z"),
        clock_out(3, "2024-01-01T09:00:00Z"),
        clock_out(4, "2024-01-01T10:00:00Z"),
    ];
    let sessions = reconstruct(&marks);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].hours_worked, 1.0);
}

#[test]
fn test_unsorted_input_is_sorted_without_mutation() {
    // newest first, as /marks/my-marks returns them
    let marks = vec![
        clock_out(4, "2024-01-02T17:00:00Z"),
        clock_in(3, "2024-01-02T09:00:00Z"),
        clock_out(2, "2024-01-01T17:00:00Z"),
        clock_in(1, "2024-01-01T09:00:00Z"),
    ];
    let before = marks.clone();

    let sessions = reconstruct(&marks);
    assert_eq!(marks, before);
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].clock_in.id.as_str(), "1");
    assert_eq!(sessions[1].clock_in.id.as_str(), "3");
    assert_eq!(sessions[0].hours_worked, 8.0);
}

#[test]
fn test_every_clock_in_appears_exactly_once() {
    let marks = vec![
        clock_in(1, "2024-01-01T08:00:00Z"),
        clock_in(2, "2024-01-01T09:00:00Z"),
        clock_out(3, "2024-01-01T10:00:00Z"),
        clock_out(4, "2024-01-01T11:00:00Z"),
        clock_in(5, "2024-01-01T12:00:00Z"),
    ];

    let sessions = reconstruct(&marks);
    let ids: Vec<&str> = sessions.iter().map(|s| s.clock_in.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "5"]);
}

#[test]
fn test_naive_and_utc_marks_pair_identically() {
    let naive = vec![
        clock_in(1, "2024-01-01T08:00:00"),
        clock_out(2, "2024-01-01T16:30:00"),
    ];
    let zoned = vec![
        clock_in(1, "2024-01-01T08:00:00Z"),
        clock_out(2, "2024-01-01T16:30:00+00:00"),
    ];
    assert_eq!(reconstruct(&naive), reconstruct(&zoned));
}

#[test]
fn test_reconstruct_and_aggregate_are_idempotent() {
    let marks = vec![
        clock_in(1, "2024-01-01T22:00:00Z"),
        clock_out(2, "2024-01-02T02:00:00Z"),
        clock_in(3, "2024-01-02T08:00:00Z"),
        clock_in(4, "2024-01-03T08:00:00Z"),
        clock_out(5, "2024-01-03T08:10:00Z"),
    ];
    let zone = viewer_zone(-300).unwrap();

    let first = aggregate(&reconstruct(&marks), &zone);
    let second = aggregate(&reconstruct(&marks), &zone);
    assert_eq!(first, second);
}

#[test]
fn test_totals_agree_across_levels() {
    let mut marks: Vec<Mark> = Vec::new();
    // irregular durations over ten days, with an open session and an orphan
    for day in 1..=10u32 {
        let id = i64::from(day) * 10;
        marks.push(clock_in(id, &format!("2024-03-{day:02}T08:{:02}:17Z", day * 3)));
        if day % 4 != 0 {
            marks.push(clock_out(
                id + 1,
                &format!("2024-03-{day:02}T16:{:02}:41Z", day * 5),
            ));
        }
    }
    marks.push(clock_out(999, "2024-02-28T10:00:00Z"));

    let sessions = reconstruct(&marks);
    let days = aggregate(&sessions, &viewer_zone(90).unwrap());

    let by_session: f64 = sessions.iter().map(|s| s.hours_worked).sum();
    let by_day: f64 = days.iter().map(|d| d.total_hours).sum();
    let inner: f64 = days
        .iter()
        .flat_map(|d| d.sessions.iter())
        .map(|s| s.hours_worked)
        .sum();

    assert!((by_session - by_day).abs() < 1e-9);
    assert!((inner - by_day).abs() < 1e-9);
    assert_eq!(sessions.len(), 10);
}

#[test]
fn test_hours_keep_sub_millisecond_precision() {
    let marks = vec![
        clock_in(1, "2024-01-01T08:00:00.000000"),
        clock_out(2, "2024-01-01T16:30:00.000999"),
    ];

    let sessions = reconstruct(&marks);
    let exact = 8.5 + 0.000999 / 3600.0;
    assert_eq!(sessions.len(), 1);
    assert!((sessions[0].hours_worked - exact).abs() < 1e-9);
}

#[test]
fn test_equal_timestamps_keep_input_order_in_then_out() {
    let marks = vec![
        clock_in(1, "2024-01-01T08:00:00Z"),
        clock_out(2, "2024-01-01T08:00:00Z"),
    ];

    let sessions = reconstruct(&marks);
    assert_eq!(sessions.len(), 1);
    assert!(!sessions[0].is_open());
    assert_eq!(sessions[0].hours_worked, 0.0);
}

#[test]
fn test_equal_timestamps_keep_input_order_out_then_in() {
    let marks = vec![
        clock_out(1, "2024-01-01T08:00:00Z"),
        clock_in(2, "2024-01-01T08:00:00Z"),
    ];

    let sessions = reconstruct(&marks);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].clock_in.id.as_str(), "2");
    assert!(sessions[0].is_open());
    assert_eq!(sessions[0].hours_worked, 0.0);
}
