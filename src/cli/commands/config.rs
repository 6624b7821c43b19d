use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};

use crate::cli::parser::Commands;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand. `path` is the configuration file in use.
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        init,
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        if !(*init || *print_config || *check || *edit_config) {
            info(format!("Configuration file: {}", path.display()));
            info("Use --init, --print, --check or --edit.");
            return Ok(());
        }

        // ---- INIT ----
        if *init {
            if path.exists() {
                warning(format!(
                    "Configuration file already exists: {}",
                    path.display()
                ));
            } else {
                Config::default().save(path)?;
                success(format!("Configuration file created: {}", path.display()));
            }
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        // ---- CHECK ----
        if *check {
            check_file(path)?;
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            edit(path, editor.clone())?;
        }
    }

    Ok(())
}

fn check_file(path: &Path) -> AppResult<()> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "{} not found: run `rclockmarks config --init`",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let (missing, unknown) = Config::check_keys(&content)?;

    for key in &missing {
        warning(format!("Missing key '{key}' (default value applies)"));
    }
    for key in &unknown {
        warning(format!("Unknown key '{key}' (ignored)"));
    }

    // values must also be usable, not only well-formed
    Config::from_yaml(&content)?;

    if missing.is_empty() && unknown.is_empty() {
        success("Configuration file is complete and valid.");
    }
    Ok(())
}

fn edit(path: &Path, requested: Option<String>) -> AppResult<()> {
    if !path.exists() {
        Config::default().save(path)?;
    }

    // Default editor for the platform
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{editor_to_use}'"
            ));
            return Ok(());
        }
        Ok(_) | Err(_) => {
            warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            ));
        }
    }

    match Command::new(&default_editor).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using fallback '{default_editor}'"
            ));
        }
        Ok(_) | Err(_) => {
            error(format!(
                "Failed to edit configuration file using fallback '{default_editor}'"
            ));
        }
    }
    Ok(())
}
