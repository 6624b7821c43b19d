use crate::api::MarkStore;
use crate::api::auth::MemoryAuth;
use crate::api::client::MarkStoreClient;
use crate::cli::commands::token_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::debug;

/// Handle the `login` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { email, password } = cmd {
        let password = match password {
            Some(p) => p.clone(),
            None => read_password()?,
        };

        let timeout = Duration::from_secs(cfg.request_timeout_secs);
        let anonymous = MarkStoreClient::new(&cfg.api_url, MemoryAuth::default(), timeout)?;
        let token = anonymous.login(email, &password)?;

        let store = token_store(cfg);
        store.save(&token)?;
        debug!(path = %store.path().display(), "login token saved");

        // confirm the token and greet by name
        let client = MarkStoreClient::new(&cfg.api_url, store, timeout)?;
        let me = client.current_user()?;
        success(format!("Logged in as {}", me.display_name()));
        if me.is_superuser {
            info("Administrator account: employee reports and mark editing are available.");
        }
    }
    Ok(())
}

fn read_password() -> AppResult<String> {
    print!("Password: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();

    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    Ok(password)
}
