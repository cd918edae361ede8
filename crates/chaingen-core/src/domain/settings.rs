//! Read-only settings and options snapshots.
//!
//! Both are safe-lookup stores: asking for a name that was never set yields
//! `None`, never an error. Names are dotted (`compiler.libcxx`) and kept in
//! insertion order so that anything derived from them is reproducible.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Settings ─────────────────────────────────────────────────────────────────

/// A snapshot of build settings (`os`, `arch`, `compiler.version`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: IndexMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a setting. Surrounding whitespace is dropped.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value: String = value.into();
        self.values.insert(name.into(), value.trim().to_string());
    }

    /// Parse a `name=value` pair, as given on the command line.
    pub fn insert_pair(&mut self, pair: &str) -> Result<(), DomainError> {
        let (name, value) = split_pair(pair).ok_or_else(|| DomainError::InvalidSetting {
            name: pair.to_string(),
            reason: "expected NAME=VALUE".into(),
        })?;
        self.insert(name, value);
        Ok(())
    }

    /// Safe lookup. Empty values count as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Overlay `other` on top of `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Settings) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Settings::new();
        for (k, v) in iter {
            settings.insert(k, v);
        }
        settings
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.values {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

// ── Options ──────────────────────────────────────────────────────────────────

/// A snapshot of package options (`shared`, `fPIC`, ...).
///
/// An option that is not part of the snapshot is different from one that is
/// set to `false`: deductions rely on that distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: IndexMap<String, bool>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    /// Parse a `name=value` pair; the value must be a boolean spelling.
    pub fn insert_pair(&mut self, pair: &str) -> Result<(), DomainError> {
        let (name, raw) = split_pair(pair).ok_or_else(|| DomainError::InvalidOption {
            name: pair.to_string(),
            reason: "expected NAME=VALUE".into(),
        })?;
        let value = Self::parse_value(name, raw)?;
        self.insert(name, value);
        Ok(())
    }

    /// Parse the textual spellings accepted for boolean options.
    pub fn parse_value(name: &str, raw: &str) -> Result<bool, DomainError> {
        match raw.trim() {
            "True" | "true" | "ON" | "on" | "1" | "yes" => Ok(true),
            "False" | "false" | "OFF" | "off" | "0" | "no" => Ok(false),
            other => Err(DomainError::InvalidOption {
                name: name.to_string(),
                reason: format!("'{other}' is not a boolean"),
            }),
        }
    }

    /// Safe lookup: `None` when the option does not exist.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn merge(&mut self, other: &Options) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), *value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn split_pair(pair: &str) -> Option<(&str, &str)> {
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value))
}
