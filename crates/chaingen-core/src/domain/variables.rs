//! Multi-configuration variable store.
//!
//! A variable can be assigned globally, per build configuration, or both.
//! Global entries are written unconditionally; configuration entries are
//! folded into a single generator expression that picks the value for the
//! active configuration at build time.
//!
//! ```rust
//! use chaingen_core::domain::Variables;
//!
//! let mut vars = Variables::new();
//! vars.set("CMAKE_VERBOSE_MAKEFILE", true);
//! vars.for_configuration("debug").set("MYVAR", "DEBUG_VALUE");
//! vars.for_configuration("release").set("MYVAR", "RELEASE_VALUE");
//!
//! let index = vars.reverse_index();
//! assert_eq!(index["MYVAR"].len(), 2);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

// ── VariableValue ────────────────────────────────────────────────────────────

/// The value of a single variable.
///
/// Flags are written the way CMake spells booleans (`ON`/`OFF`); text is
/// passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Flag(bool),
    Text(String),
}

impl VariableValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Flag(true) => "ON",
            Self::Flag(false) => "OFF",
            Self::Text(text) => text,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl Serialize for VariableValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_text())
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

// ── ConfigurationBucket ──────────────────────────────────────────────────────

/// Variables assigned for one build configuration (`debug`, `release`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationBucket {
    entries: IndexMap<String, VariableValue>,
}

impl ConfigurationBucket {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Variables ────────────────────────────────────────────────────────────────

/// Reverse index: variable name → `(configuration, value)` pairs.
pub type ReverseIndex = IndexMap<String, Vec<(String, VariableValue)>>;

/// Global and per-configuration variable assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    global: IndexMap<String, VariableValue>,
    configurations: IndexMap<String, ConfigurationBucket>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a configuration-independent value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> &mut Self {
        self.global.insert(name.into(), value.into());
        self
    }

    /// Look up a configuration-independent value.
    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.global.get(name)
    }

    /// Bucket for `configuration`, created empty on first use.
    pub fn for_configuration(&mut self, configuration: impl Into<String>) -> &mut ConfigurationBucket {
        self.configurations.entry(configuration.into()).or_default()
    }

    /// Assign a value for one configuration.
    pub fn set_for_configuration(
        &mut self,
        configuration: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<VariableValue>,
    ) -> &mut Self {
        self.for_configuration(configuration).set(name, value);
        self
    }

    /// Read-only view of a configuration bucket, if it was ever touched.
    pub fn configuration(&self, configuration: &str) -> Option<&ConfigurationBucket> {
        self.configurations.get(configuration)
    }

    /// Configuration names in first-touch order.
    pub fn configurations(&self) -> impl Iterator<Item = &str> {
        self.configurations.keys().map(String::as_str)
    }

    pub fn global(&self) -> impl Iterator<Item = (&str, &VariableValue)> {
        self.global.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// For every name set in any configuration, the values it takes per
    /// configuration. Names appear in first-seen order and each list follows
    /// configuration first-touch order.
    pub fn reverse_index(&self) -> ReverseIndex {
        let mut index = ReverseIndex::new();
        for (configuration, bucket) in &self.configurations {
            for (name, value) in &bucket.entries {
                index
                    .entry(name.clone())
                    .or_default()
                    .push((configuration.clone(), value.clone()));
            }
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.configurations.values().all(ConfigurationBucket::is_empty)
    }

    /// Global entries as `[{name, value}]` for the render context.
    pub fn global_records(&self) -> Vec<VariableRecord> {
        self.global
            .iter()
            .map(|(name, value)| VariableRecord {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }

    /// Reverse index as `[{name, values: [[config, value]], fallback?}]` for
    /// the render context. `fallback` is the global value of the same name,
    /// used by configurations without their own entry.
    pub fn configuration_records(&self) -> Vec<ConfigurationRecord> {
        self.reverse_index()
            .into_iter()
            .map(|(name, values)| ConfigurationRecord {
                fallback: self.global.get(&name).cloned(),
                name,
                values,
            })
            .collect()
    }
}

/// A global assignment as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableRecord {
    pub name: String,
    pub value: VariableValue,
}

/// A per-configuration assignment as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationRecord {
    pub name: String,
    pub values: Vec<(String, VariableValue)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<VariableValue>,
}
