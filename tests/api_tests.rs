mod common;
use chrono::NaiveDate;
use reqwest::StatusCode;
use rclockmarks::api::MarkStore;
use rclockmarks::api::auth::{AuthContext, FileTokenStore, MemoryAuth, Token};
use rclockmarks::api::client::{MarkStoreClient, api_error, endpoint, weekly_report_query};
use rclockmarks::errors::AppError;
use rclockmarks::models::id::Id;
use rclockmarks::models::mark::Mark;
use rclockmarks::models::mark_type::MarkType;
use rclockmarks::models::payload::{ClockPayload, UserUpdate};
use rclockmarks::models::report::WeeklyReport;
use rclockmarks::models::user::User;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Serve one canned HTTP response on loopback; the join handle yields the
/// raw request that was received.
fn one_shot_server(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap();
            }
            request.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        request.push_str(&String::from_utf8_lossy(&body));

        reader.get_mut().write_all(response.as_bytes()).unwrap();
        request
    });

    (url, handle)
}

/// Loopback client that ignores any proxy configured in the environment.
fn client(url: &str, auth: MemoryAuth) -> MarkStoreClient<MemoryAuth> {
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    MarkStoreClient::with_http_client(http, url, auth)
}

#[test]
fn test_endpoint_joins_paths() {
    assert_eq!(
        endpoint("http://api.local:8000/", "/marks/my-marks"),
        "http://api.local:8000/marks/my-marks"
    );
    assert_eq!(
        endpoint(" https://x.io/api// ", "users/me"),
        "https://x.io/api/users/me"
    );
}

#[test]
fn test_weekly_report_query_uses_browser_convention() {
    let q = weekly_report_query(
        NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
        300,
    );
    assert_eq!(
        q,
        vec![
            ("start_date", "2024-01-06".to_string()),
            ("end_date", "2024-01-12".to_string()),
            ("timezone_offset_minutes", "300".to_string()),
        ]
    );
}

#[test]
fn test_api_error_prefers_server_detail() {
    let e = api_error(
        StatusCode::BAD_REQUEST,
        r#"{"detail": "You need to clock in before clocking out."}"#,
        "Failed to clock out",
    );
    assert_eq!(
        e.to_string(),
        "You need to clock in before clocking out. (HTTP 400)"
    );

    let e = api_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"detail": [{"loc": ["body", "latitude"], "msg": "field required"}]}"#,
        "Failed",
    );
    assert!(matches!(e, AppError::Api { status: 422, ref message } if message == "field required"));

    let e = api_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>", "Failed to get marks");
    assert!(matches!(e, AppError::Api { status: 502, ref message } if message == "Failed to get marks"));
}

#[test]
fn test_id_accepts_numbers_and_strings() {
    let n: Id = serde_json::from_str("42").unwrap();
    let s: Id = serde_json::from_str(r#""9b2f-uuid""#).unwrap();
    assert_eq!(n, Id::from(42));
    assert_eq!(s.as_str(), "9b2f-uuid");

    assert_eq!(serde_json::to_string(&n).unwrap(), "42");
    assert_eq!(serde_json::to_string(&s).unwrap(), r#""9b2f-uuid""#);
    assert_eq!(serde_json::to_string(&Id::new("007")).unwrap(), r#""007""#);
    assert!(serde_json::from_str::<Id>(r#""  ""#).is_err());
}

#[test]
fn test_mark_parses_naive_server_timestamps() {
    let json = r#"{"id": 1, "user_id": 2, "mark_type": "clock_in",
        "timestamp": "2024-01-01T08:00:00", "latitude": 1.5, "longitude": 2.5}"#;
    let m: Mark = serde_json::from_str(json).unwrap();

    assert_eq!(m.mark_type, MarkType::ClockIn);
    assert_eq!(m.timestamp.to_rfc3339(), "2024-01-01T08:00:00+00:00");
    assert_eq!(m.po(), None);
    assert_eq!(m.address, None);

    let bad = json.replace("clock_in", "lunch");
    assert!(serde_json::from_str::<Mark>(&bad).is_err());
}

#[test]
fn test_weekly_report_parses_server_payload() {
    let json = r#"{
        "user_id": 3, "user_name": "Ana Diaz", "user_email": "ana@example.com",
        "start_date": "2024-01-06", "end_date": "2024-01-12T00:00:00",
        "total_hours": 8.5,
        "daily_reports": [{
            "date": "2024-01-06T00:00:00",
            "total_hours": 8.5,
            "sessions": [{
                "clock_in": {"id": 1, "user_id": 3, "mark_type": "clock_in",
                    "timestamp": "2024-01-06T08:00:00", "latitude": 0, "longitude": 0},
                "clock_out": {"id": 2, "user_id": 3, "mark_type": "clock_out",
                    "timestamp": "2024-01-06T16:30:00", "latitude": 0, "longitude": 0},
                "hours_worked": 8.5
            }]
        }]
    }"#;
    let r: WeeklyReport = serde_json::from_str(json).unwrap();

    assert_eq!(r.end_date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
    assert_eq!(r.daily_reports[0].date, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    assert_eq!(r.session_count(), 1);
    assert_eq!(r.display_name(), "Ana Diaz");
}

#[test]
fn test_user_defaults_and_display_name() {
    let u: User = serde_json::from_str(r#"{"id": 5, "email": "bo@example.com"}"#).unwrap();
    assert!(u.is_active);
    assert!(!u.is_superuser);
    assert_eq!(u.display_name(), "bo@example.com");
}

#[test]
fn test_file_token_store_round_trip() {
    let path = common::temp_out("token_store", "token");
    let store = FileTokenStore::new(&path);

    assert!(store.current_token().is_none());
    store.save(&Token::new("abc.def")).unwrap();
    assert_eq!(store.current_token().unwrap().expose(), "abc.def");

    store.on_unauthorized();
    assert!(store.current_token().is_none());
    assert!(!store.clear().unwrap());
}

#[test]
fn test_token_debug_is_redacted() {
    assert_eq!(format!("{:?}", Token::new("secret")), "Token(***)");
}

#[test]
fn test_missing_token_fails_before_sending() {
    let c = client("http://127.0.0.1:9", MemoryAuth::default());
    assert!(matches!(c.my_marks(), Err(AppError::NotAuthenticated)));
}

#[test]
fn test_requests_carry_bearer_token() {
    let body = r#"[{"id": 1, "user_id": 2, "mark_type": "clock_in",
        "timestamp": "2024-01-01T08:00:00", "latitude": 1, "longitude": 2}]"#;
    let (url, server) = one_shot_server("200 OK", body);

    let marks = client(&url, MemoryAuth::with_token("tok-1")).my_marks().unwrap();
    let request = server.join().unwrap();

    assert_eq!(marks.len(), 1);
    assert!(request.starts_with("GET /marks/my-marks "));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer tok-1"));
}

#[test]
fn test_weekly_report_request_query() {
    let body = r#"{"user_id": 3, "start_date": "2024-01-06", "end_date": "2024-01-12",
        "daily_reports": [], "total_hours": 0}"#;
    let (url, server) = one_shot_server("200 OK", body);

    let report = client(&url, MemoryAuth::with_token("t"))
        .weekly_report(
            &Id::from(3),
            NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            -60,
        )
        .unwrap();
    let request = server.join().unwrap();

    assert!(report.daily_reports.is_empty());
    assert!(request.starts_with(
        "GET /marks/weekly-report/3?start_date=2024-01-06&end_date=2024-01-12&timezone_offset_minutes=-60 "
    ));
}

#[test]
fn test_clock_in_posts_json_payload() {
    let body = r#"{"id": 9, "user_id": 2, "mark_type": "clock_in",
        "timestamp": "2024-01-01T08:00:00", "latitude": 40.5, "longitude": -3.5,
        "po_number": "PO-1", "address": "Calle Mayor 1"}"#;
    let (url, server) = one_shot_server("200 OK", body);

    let mark = client(&url, MemoryAuth::with_token("t"))
        .clock_in(&ClockPayload {
            latitude: 40.5,
            longitude: -3.5,
            po_number: Some("PO-1".into()),
        })
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(mark.address.as_deref(), Some("Calle Mayor 1"));
    assert!(request.starts_with("POST /marks/clock-in "));
    assert!(request.contains(r#""po_number":"PO-1""#));
}

#[test]
fn test_unauthorized_response_drops_session() {
    let (url, server) = one_shot_server("401 Unauthorized", r#"{"detail": "Unauthorized"}"#);
    let c = client(&url, MemoryAuth::with_token("expired"));

    let err = c.current_user().unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, AppError::Unauthorized));
    assert!(err.is_auth_failure());
    assert_eq!(c.auth().unauthorized_calls(), 1);
    assert!(c.auth().current_token().is_none());
}

#[test]
fn test_server_error_keeps_detail() {
    let (url, server) = one_shot_server("400 Bad Request", r#"{"detail": "Already clocked in"}"#);

    let err = client(&url, MemoryAuth::with_token("t"))
        .clock_in(&ClockPayload {
            latitude: 0.0,
            longitude: 0.0,
            po_number: None,
        })
        .unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, AppError::Api { status: 400, ref message } if message == "Already clocked in"));
}

#[test]
fn test_login_posts_form_credentials() {
    let (url, server) = one_shot_server(
        "200 OK",
        r#"{"access_token": "jwt-123", "token_type": "bearer"}"#,
    );

    let token = client(&url, MemoryAuth::default())
        .login("ana@example.com", "p@ss word")
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(token.expose(), "jwt-123");
    assert!(request.starts_with("POST /auth/jwt/login "));
    assert!(request.contains("username=ana%40example.com&password=p%40ss+word"));

    let c = client(&url, MemoryAuth::default());
    assert!(matches!(c.login("", "x"), Err(AppError::Validation(_))));
}

#[test]
fn test_user_by_id_request() {
    let body = r#"{"id": 5, "email": "ann@example.com", "first_name": "Ann", "last_name": "Lee",
        "is_superuser": false, "is_active": true}"#;
    let (url, server) = one_shot_server("200 OK", body);

    let user = client(&url, MemoryAuth::with_token("tok-1"))
        .user_by_id(&Id::from(5))
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(user.display_name(), "Ann Lee");
    assert!(request.starts_with("GET /users/5 "));
}

#[test]
fn test_update_user_patches_names() {
    let body = r#"{"id": 5, "email": "ann@example.com", "first_name": "Anna", "last_name": "Lee"}"#;
    let (url, server) = one_shot_server("200 OK", body);

    let update = UserUpdate::new(Some(" Anna "), None).unwrap();
    let user = client(&url, MemoryAuth::with_token("tok-1"))
        .update_user(&Id::from(5), &update)
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(user.first_name.as_deref(), Some("Anna"));
    assert!(request.starts_with("PATCH /users/5 "));
    assert!(request.ends_with(r#"{"first_name":"Anna"}"#));
}

#[test]
fn test_user_update_needs_a_name() {
    assert!(matches!(
        UserUpdate::new(None, Some("   ")),
        Err(AppError::Validation(_))
    ));
    let both = UserUpdate::new(Some("Ann"), Some("Lee")).unwrap();
    assert_eq!(
        serde_json::to_string(&both).unwrap(),
        r#"{"first_name":"Ann","last_name":"Lee"}"#
    );
}
