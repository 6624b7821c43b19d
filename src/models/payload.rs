//! Request bodies sent to the Mark Store.

use super::{id::Id, mark_type::MarkType};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /marks/clock-in` and `POST /marks/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockPayload {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
}

/// Body of `POST /marks/create` (admin).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewMark {
    pub user_id: Id,
    pub mark_type: MarkType,
    #[serde(serialize_with = "crate::utils::time::serialize_naive_utc")]
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
}

/// Body of `PUT /marks/{id}` (admin). Only the given fields change.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MarkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_type: Option<MarkType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::utils::time::serialize_opt_naive_utc"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
}

impl MarkUpdate {
    pub fn is_empty(&self) -> bool {
        self == &MarkUpdate::default()
    }
}

/// Body of `PATCH /users/{id}` (admin). Only the given names change.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserUpdate {
    /// Trimmed names; blank ones are dropped. Fails when nothing is left.
    pub fn new(first_name: Option<&str>, last_name: Option<&str>) -> AppResult<Self> {
        let clean = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let update = Self {
            first_name: clean(first_name),
            last_name: clean(last_name),
        };
        if update == Self::default() {
            return Err(AppError::Validation(
                "Nothing to update: pass --first-name and/or --last-name".to_string(),
            ));
        }
        Ok(update)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}
