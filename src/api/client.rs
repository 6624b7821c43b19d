//! Blocking HTTP client for the Mark Store.
//!
//! One request per operation, no retries: a failure is returned to the
//! caller, which reports it and lets the user run the command again.

use super::MarkStore;
use super::auth::{AuthContext, Token};
use crate::errors::{AppError, AppResult};
use crate::models::id::Id;
use crate::models::mark::Mark;
use crate::models::payload::{
    ClockPayload, ErrorBody, MarkUpdate, NewMark, TokenResponse, UserUpdate,
};
use crate::models::report::WeeklyReport;
use crate::models::user::User;
use chrono::NaiveDate;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub struct MarkStoreClient<A: AuthContext> {
    http: Client,
    base_url: String,
    auth: A,
}

impl<A: AuthContext> MarkStoreClient<A> {
    pub fn new(base_url: &str, auth: A, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rclockmarks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http_client(http, base_url, auth))
    }

    /// Use a preconfigured HTTP client (proxy settings, custom TLS roots).
    pub fn with_http_client(http: Client, base_url: &str, auth: A) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Exchange credentials for a bearer token (`username` is the email).
    pub fn login(&self, email: &str, password: &str) -> AppResult<Token> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let url = endpoint(&self.base_url, "/auth/jwt/login");
        debug!(%url, "POST login");

        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&[("username", email.trim()), ("password", password)])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(api_error(status, &body, "Login failed"));
        }

        let token: TokenResponse = resp.json()?;
        Ok(Token::new(token.access_token))
    }

    fn authorized(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let token = self.auth.current_token().ok_or(AppError::NotAuthenticated)?;
        let url = endpoint(&self.base_url, path);
        debug!(%method, %url, "request");

        Ok(self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", token.expose())))
    }

    /// Send and map the status: 401 invalidates the session, other non-2xx
    /// become [`AppError::Api`] with the server's `detail` when present.
    fn execute(&self, req: RequestBuilder, failure: &str) -> AppResult<Response> {
        let resp = req.send()?;
        let status = resp.status();
        debug!(status = status.as_u16(), "response");

        if status == StatusCode::UNAUTHORIZED {
            warn!("token rejected by the server, discarding local session");
            self.auth.on_unauthorized();
            return Err(AppError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(api_error(status, &body, failure));
        }

        Ok(resp)
    }

    fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder, failure: &str) -> AppResult<T> {
        Ok(self.execute(req, failure)?.json()?)
    }
}

impl<A: AuthContext> MarkStore for MarkStoreClient<A> {
    fn current_user(&self) -> AppResult<User> {
        let req = self.authorized(Method::GET, "/users/me")?;
        self.fetch(req, "Failed to get user")
    }

    fn list_users(&self) -> AppResult<Vec<User>> {
        let req = self.authorized(Method::GET, "/users")?;
        self.fetch(req, "Failed to get users")
    }

    fn user_by_id(&self, id: &Id) -> AppResult<User> {
        let req = self.authorized(Method::GET, &format!("/users/{id}"))?;
        self.fetch(req, "Failed to get user")
    }

    fn update_user(&self, id: &Id, update: &UserUpdate) -> AppResult<User> {
        let req = self
            .authorized(Method::PATCH, &format!("/users/{id}"))?
            .json(update);
        self.fetch(req, "Failed to update user")
    }

    fn my_marks(&self) -> AppResult<Vec<Mark>> {
        let req = self.authorized(Method::GET, "/marks/my-marks")?;
        self.fetch(req, "Failed to get marks")
    }

    fn clock_in(&self, payload: &ClockPayload) -> AppResult<Mark> {
        let req = self.authorized(Method::POST, "/marks/clock-in")?.json(payload);
        self.fetch(req, "Failed to clock in")
    }

    fn clock_out(&self, payload: &ClockPayload) -> AppResult<Mark> {
        let req = self.authorized(Method::POST, "/marks/clock-out")?.json(payload);
        self.fetch(req, "Failed to clock out")
    }

    fn weekly_report(
        &self,
        user_id: &Id,
        start: NaiveDate,
        end: NaiveDate,
        browser_offset_minutes: i32,
    ) -> AppResult<WeeklyReport> {
        let path = format!("/marks/weekly-report/{user_id}");
        let req = self
            .authorized(Method::GET, &path)?
            .query(&weekly_report_query(start, end, browser_offset_minutes));
        self.fetch(req, "Failed to get weekly report")
    }

    fn create_mark(&self, mark: &NewMark) -> AppResult<Mark> {
        let req = self.authorized(Method::POST, "/marks/create")?.json(mark);
        self.fetch(req, "Failed to create mark")
    }

    fn update_mark(&self, id: &Id, update: &MarkUpdate) -> AppResult<Mark> {
        let req = self
            .authorized(Method::PUT, &format!("/marks/{id}"))?
            .json(update);
        self.fetch(req, "Failed to update mark")
    }

    fn delete_mark(&self, id: &Id) -> AppResult<()> {
        let req = self.authorized(Method::DELETE, &format!("/marks/{id}"))?;
        self.execute(req, "Failed to delete mark")?;
        Ok(())
    }
}

/// Base URL without trailing slashes.
pub fn normalize_base_url(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        normalize_base_url(base),
        path.trim_start_matches('/')
    )
}

pub fn weekly_report_query(
    start: NaiveDate,
    end: NaiveDate,
    browser_offset_minutes: i32,
) -> Vec<(&'static str, String)> {
    vec![
        ("start_date", start.format("%Y-%m-%d").to_string()),
        ("end_date", end.format("%Y-%m-%d").to_string()),
        ("timezone_offset_minutes", browser_offset_minutes.to_string()),
    ]
}

/// Build the error for a failed response. `{"detail": "..."}` bodies give
/// the message; anything else falls back to `failure`.
pub fn api_error(status: StatusCode, body: &str, failure: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| detail_message(&b.detail))
        .unwrap_or_else(|| failure.to_string());

    AppError::Api {
        status: status.as_u16(),
        message,
    }
}

fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // validation errors: [{"loc": [...], "msg": "..."}, ...]
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
