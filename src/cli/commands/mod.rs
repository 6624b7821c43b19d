//! Command handlers. Each `handle` receives the parsed command and the
//! effective configuration.

pub mod clock;
pub mod config;
pub mod export;
pub mod login;
pub mod logout;
pub mod marks;
pub mod report;
pub mod status;
pub mod summary;
pub mod users;
pub mod whoami;

use crate::api::auth::{AuthContext, FileTokenStore, MemoryAuth};
use crate::api::client::MarkStoreClient;
use crate::cli::parser::{PeriodArgs, ReportArgs, SourceArg};
use crate::config::Config;
use crate::core::calculator::report::DayPolicy;
use crate::core::logic::{ReportRequest, ReportSource};
use crate::errors::AppResult;
use crate::models::id::Id;
use crate::ui::messages::warning;
use crate::utils::date::{self, week_containing};
use crate::utils::path::expand_tilde;
use crate::utils::range::parse_range;
use crate::utils::time::viewer_zone;
use chrono::{Duration, FixedOffset, NaiveDate};
use std::env;
use std::io::{self, Write};
use std::time::Duration as StdDuration;
use tracing::debug;

/// A bearer token here is used for this run only and never written to disk.
pub const TOKEN_ENV: &str = "RCLOCKMARKS_TOKEN";

pub(crate) type Client = MarkStoreClient<Box<dyn AuthContext>>;

pub(crate) fn token_store(cfg: &Config) -> FileTokenStore {
    FileTokenStore::new(expand_tilde(&cfg.token_file))
}

/// Client for the configured Mark Store, authenticated with the
/// environment token when set, the stored one otherwise.
pub(crate) fn client(cfg: &Config) -> AppResult<Client> {
    let auth: Box<dyn AuthContext> = match env::var(TOKEN_ENV) {
        Ok(t) if !t.trim().is_empty() => {
            debug!("using token from {TOKEN_ENV}");
            Box::new(MemoryAuth::with_token(t.trim()))
        }
        _ => Box::new(token_store(cfg)),
    };

    MarkStoreClient::new(
        &cfg.api_url,
        auth,
        StdDuration::from_secs(cfg.request_timeout_secs),
    )
}

/// First and last day selected by `--period` or `--start/--end`.
///
/// A lone `--start` or `--end` selects the seven days starting or ending
/// there; nothing selects the report week containing today.
pub(crate) fn resolve_period(p: &PeriodArgs, cfg: &Config) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some(period) = &p.period {
        return parse_range(period);
    }

    match (&p.start, &p.end) {
        (Some(s), Some(e)) => Ok((date::parse_date(s)?, date::parse_date(e)?)),
        (Some(s), None) => {
            let start = date::parse_date(s)?;
            Ok((start, start + Duration::days(6)))
        }
        (None, Some(e)) => {
            let end = date::parse_date(e)?;
            Ok((end - Duration::days(6), end))
        }
        (None, None) => Ok(week_containing(date::today(), cfg.week_start()?)),
    }
}

pub(crate) fn resolve_zone(p: &PeriodArgs, cfg: &Config) -> AppResult<FixedOffset> {
    match p.tz_offset {
        Some(minutes) => viewer_zone(minutes),
        None => cfg.viewer_zone(),
    }
}

pub(crate) fn report_request(args: &ReportArgs, cfg: &Config) -> AppResult<ReportRequest> {
    let (start, end) = resolve_period(&args.period, cfg)?;

    Ok(ReportRequest {
        user_id: args.user.as_deref().map(Id::from),
        start,
        end,
        zone: resolve_zone(&args.period, cfg)?,
        policy: if args.all_days {
            DayPolicy::Dense
        } else {
            DayPolicy::Sparse
        },
        source: match args.source {
            SourceArg::Server => ReportSource::Server,
            SourceArg::Local => ReportSource::Local,
        },
    })
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
