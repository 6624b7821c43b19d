use crate::cli::commands::token_store;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cfg: &Config) -> AppResult<()> {
    if token_store(cfg).clear()? {
        success("Logged out.");
    } else {
        info("No stored session.");
    }
    Ok(())
}
