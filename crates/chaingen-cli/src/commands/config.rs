//! `chaingen config` - inspect the effective configuration.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    explicit_file: Option<&PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.data(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&to_json(&config)?)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.data(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            let path = active_config_path(explicit_file, Path::new("."));
            output.data(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn to_json(config: &AppConfig) -> CliResult<Value> {
    serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Look up a dotted key such as `generation.parallel`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let pointer = format!("/{}", key.replace('.', "/"));
    to_json(config)?
        .pointer(&pointer)
        .filter(|value| !value.is_object())
        .cloned()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The file that configuration is read from: `--config`, else a local
/// `.chaingen.toml`, else the user config file.
fn active_config_path(explicit_file: Option<&PathBuf>, cwd: &Path) -> PathBuf {
    if let Some(path) = explicit_file {
        return path.clone();
    }
    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return local;
    }
    AppConfig::config_path()
}

// ── tests ─────────────────────────────────────────────────────────────────────
