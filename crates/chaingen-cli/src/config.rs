//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CHAINGEN__<SECTION>__<KEY>`, e.g.
//!    `CHAINGEN__ANDROID__NDK=/opt/ndk`
//! 3. `.chaingen.toml` in the current directory
//! 4. The user config file (see [`AppConfig::config_path`])
//! 5. Built-in defaults
//!
//! `--config FILE` replaces 3 and 4 with a single required file.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".chaingen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub templates: TemplateConfig,
    pub android: AndroidConfig,
    pub output: OutputConfig,
}

/// Defaults for `chaingen generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// CMake generator used when `--generator` is not given.
    pub generator: Option<String>,
    /// Emit `/MP` for Visual Studio generators.
    pub parallel: bool,
    pub install_prefix: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generator: None,
            parallel: true,
            install_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template directory used instead of the built-in templates.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// NDK root.
    pub ndk: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. The
    /// default locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(config_file.map(PathBuf::as_path), Path::new("."))
    }

    fn load_from(config_file: Option<&Path>, cwd: &Path) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(cwd.join(LOCAL_CONFIG_FILE)).required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("CHAINGEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("reading configuration sources")?;

        config
            .try_deserialize()
            .context("configuration has an unexpected shape")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.chaingen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "chaingen", "chaingen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(cfg.generation.parallel);
        assert_eq!(cfg.generation.generator, None);
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chaingen.toml");
        fs::write(
            &path,
            "[generation]\nparallel = false\ngenerator = \"Ninja\"\n\n[android]\nndk = \"/opt/ndk\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(Some(&path), dir.path()).unwrap();
        assert!(!cfg.generation.parallel);
        assert_eq!(cfg.generation.generator.as_deref(), Some("Ninja"));
        assert_eq!(cfg.android.ndk.as_deref(), Some("/opt/ndk"));
        // Untouched sections keep their defaults.
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn local_file_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            "[templates]\ndir = \"cmake/templates\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(None, dir.path()).unwrap();
        assert_eq!(cfg.templates.dir, Some(PathBuf::from("cmake/templates")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load_from(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
