//! Unified application error type.
//! All modules (api, core, cli, export, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Mark Store API
    // ---------------------------
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Session expired or invalid token: please log in again")]
    Unauthorized,

    #[error("Not authenticated: run `rclockmarks login` first")]
    NotAuthenticated,

    // ---------------------------
    // Validation (caught before submission)
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// True for failures that invalidated the local session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Unauthorized | AppError::NotAuthenticated)
    }
}

pub type AppResult<T> = Result<T, AppError>;
