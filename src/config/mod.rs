use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::utils::date::parse_weekday;
use crate::utils::time::{local_offset_minutes, viewer_zone};
use chrono::{FixedOffset, Weekday};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "RCLOCKMARKS_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub token_file: String,
    /// Viewer zone, east-positive minutes (UTC-5 → -300). Unset means the
    /// machine's local offset.
    pub utc_offset_minutes: Option<i32>,
    pub week_start: String,
    pub request_timeout_secs: u64,
    pub default_export_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            token_file: Self::config_dir().join("token").to_string_lossy().to_string(),
            utc_offset_minutes: None,
            week_start: "saturday".to_string(),
            request_timeout_secs: 30,
            default_export_format: "pdf".to_string(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rclockmarks")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rclockmarks")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rclockmarks.conf")
    }

    /// Load configuration from `path` (or the standard file), falling back to
    /// defaults when the file does not exist. The API URL environment
    /// variable wins over the file.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)?
        } else {
            Config::default()
        };

        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            cfg.api_url = url;
        }

        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the configuration, creating the directory when needed.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_url must start with http:// or https:// (got '{}')",
                self.api_url
            )));
        }
        self.week_start()?;
        self.viewer_zone()?;
        ExportFormat::parse(&self.default_export_format).map_err(|_| {
            AppError::Config(format!(
                "default_export_format must be csv, json, xlsx or pdf (got '{}')",
                self.default_export_format
            ))
        })?;
        Ok(())
    }

    pub fn week_start(&self) -> AppResult<Weekday> {
        parse_weekday(&self.week_start)
    }

    /// The fixed offset reports are bucketed and displayed in.
    pub fn viewer_zone(&self) -> AppResult<FixedOffset> {
        viewer_zone(self.utc_offset_minutes.unwrap_or_else(local_offset_minutes))
    }

    /// Keys of a config file that are missing or unknown to this version.
    pub fn check_keys(content: &str) -> AppResult<(Vec<String>, Vec<String>)> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let known = serde_yaml::to_value(Config::default())?;

        let keys = |v: &serde_yaml::Value| -> Vec<String> {
            v.as_mapping()
                .map(|m| {
                    m.keys()
                        .filter_map(|k| k.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        let present = keys(&value);
        let expected = keys(&known);

        let missing = expected
            .iter()
            .filter(|k| !present.contains(k))
            .cloned()
            .collect();
        let unknown = present
            .iter()
            .filter(|k| !expected.contains(k))
            .cloned()
            .collect();

        Ok((missing, unknown))
    }
}
