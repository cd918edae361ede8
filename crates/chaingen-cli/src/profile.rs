//! TOML profiles.
//!
//! ```toml
//! [settings]
//! os = "Android"
//! arch = "armv8"
//! compiler = "clang"
//! "os.api_level" = "21"
//! "compiler.libcxx" = "c++_shared"
//!
//! [options]
//! shared = false
//! fPIC = "True"
//!
//! [variables]
//! CMAKE_VERBOSE_MAKEFILE = true
//!
//! [variables.debug]
//! MYVAR = "DEBUG_VALUE"
//!
//! [definitions.release]
//! NDEBUG = "1"
//! ```
//!
//! Nested tables flatten to dotted names too (`[settings.compiler]` with
//! `version = "9"` gives `compiler.version`), but TOML will not let `os` be
//! both a value and a table, so sub-settings of a set value need quoted keys.

use std::fs;
use std::path::Path;

use toml::{Table, Value};
use tracing::{debug, warn};

use chaingen_core::domain::{Options, Settings, VariableValue, Variables};

use crate::error::{CliError, CliResult, IntoCli};

/// Everything a profile file can describe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub settings: Settings,
    pub options: Options,
    pub variables: Variables,
    pub definitions: Variables,
}

impl Profile {
    /// Read and parse the profile at `path`.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.is_file() {
            return Err(CliError::ProfileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)
            .with_cli_context(|| format!("reading profile {}", path.display()))?;
        let profile = Self::parse(&text).map_err(|message| CliError::InvalidProfile {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(
            path = %path.display(),
            settings = profile.settings.len(),
            "Profile loaded"
        );
        Ok(profile)
    }

    /// Parse profile text.
    pub fn parse(text: &str) -> Result<Self, String> {
        let table: Table = toml::from_str(text).map_err(|e| e.to_string())?;
        let mut profile = Self::default();

        for (section, value) in &table {
            match section.as_str() {
                "settings" => flatten_settings("", as_table(section, value)?, &mut profile.settings)?,
                "options" => read_options(as_table(section, value)?, &mut profile.options)?,
                "variables" => read_variables(section, as_table(section, value)?, &mut profile.variables)?,
                "definitions" => {
                    read_variables(section, as_table(section, value)?, &mut profile.definitions)?
                }
                other => warn!(section = other, "Ignoring unknown profile section"),
            }
        }
        Ok(profile)
    }
}

fn as_table<'a>(name: &str, value: &'a Value) -> Result<&'a Table, String> {
    value
        .as_table()
        .ok_or_else(|| format!("[{name}] must be a table"))
}

fn flatten_settings(prefix: &str, table: &Table, settings: &mut Settings) -> Result<(), String> {
    for (key, value) in table {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(nested) => flatten_settings(&name, nested, settings)?,
            scalar => settings.insert(name.clone(), scalar_text(&name, scalar)?),
        }
    }
    Ok(())
}

fn read_options(table: &Table, options: &mut Options) -> Result<(), String> {
    for (name, value) in table {
        let flag = match value {
            Value::Boolean(flag) => *flag,
            scalar => Options::parse_value(name, &scalar_text(name, scalar)?)
                .map_err(|e| e.to_string())?,
        };
        options.insert(name.clone(), flag);
    }
    Ok(())
}

fn read_variables(section: &str, table: &Table, variables: &mut Variables) -> Result<(), String> {
    for (key, value) in table {
        match value {
            Value::Table(bucket) => {
                for (name, value) in bucket {
                    if value.is_table() {
                        return Err(format!(
                            "[{section}.{key}] {name}: configurations cannot be nested"
                        ));
                    }
                    variables
                        .for_configuration(key.clone())
                        .set(name.clone(), variable_value(name, value)?);
                }
            }
            scalar => {
                variables.set(key.clone(), variable_value(key, scalar)?);
            }
        }
    }
    Ok(())
}

fn variable_value(name: &str, value: &Value) -> Result<VariableValue, String> {
    match value {
        Value::Boolean(flag) => Ok(VariableValue::Flag(*flag)),
        scalar => scalar_text(name, scalar).map(VariableValue::Text),
    }
}

fn scalar_text(name: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(d) => Ok(d.to_string()),
        Value::Array(_) | Value::Table(_) => Err(format!("'{name}' must be a single value")),
    }
}
