//! rclockmarks library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind them: Mark Store client, session/report logic and exports.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter (`debug`, `rclockmarks=trace`, ...).
pub const LOG_ENV: &str = "RCLOCKMARKS_LOG";

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    use cli::commands;

    match &cli.command {
        Commands::Login { .. } => commands::login::handle(&cli.command, cfg),
        Commands::Logout => commands::logout::handle(cfg),
        Commands::Whoami => commands::whoami::handle(cfg),
        Commands::Clock { .. } => commands::clock::handle(&cli.command, cfg),
        Commands::Status => commands::status::handle(cfg),
        Commands::Marks { .. } => commands::marks::handle(&cli.command, cfg),
        Commands::Users { .. } => commands::users::handle(&cli.command, cfg),
        Commands::Report { .. } => commands::report::handle(&cli.command, cfg),
        Commands::Summary { .. } => commands::summary::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg, config_path),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second init (tests calling run twice) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file);

    // a broken file must not lock the user out of `config --check/--edit`
    let mut cfg = match Config::load(Some(&config_path)) {
        Ok(cfg) => cfg,
        Err(e) if matches!(cli.command, Commands::Config { .. }) => {
            ui::messages::warning(format!("{e}: using defaults"));
            Config::default()
        }
        Err(e) => return Err(e),
    };

    if let Some(url) = &cli.api_url {
        cfg.api_url = url.clone();
        cfg.validate()?;
    }

    dispatch(&cli, &cfg, &config_path)
}

