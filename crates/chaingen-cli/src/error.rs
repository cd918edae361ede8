//! CLI errors: one enum wrapping core failures plus the few the CLI raises
//! itself, each with suggestions and an exit code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use chaingen_core::error::{ChaingenError, ErrorCategory as CoreCategory};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A profile file does not exist.
    #[error("Profile not found: {}", path.display())]
    ProfileNotFound { path: PathBuf },

    /// A profile file exists but cannot be used.
    #[error("Invalid profile {}: {message}", path.display())]
    InvalidProfile { path: PathBuf, message: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed, or a key is unknown.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `chaingen-core` or an adapter.
    #[error("Generation failed: {0}")]
    Core(#[from] ChaingenError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProfileNotFound { path } => vec![
                format!("No file at '{}'", path.display()),
                "Profile paths are relative to the current directory".into(),
            ],

            Self::InvalidProfile { .. } => vec![
                "Profiles are TOML with [settings], [options], [variables] and [definitions] tables"
                    .into(),
                "Per-configuration values go in sub-tables, e.g. [variables.debug]".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Run 'chaingen config path' to find the active config file".into(),
                "Run 'chaingen config list' to see every known key".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProfile { .. } => ErrorCategory::UserError,
            Self::ProfileNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Text written to stderr: the message, its cause chain when `verbose`,
    /// then suggestions.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_string() }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("error:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.red().to_string()),
        );

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!(
                    "  {}\n",
                    paint(&format!("caused by: {cause}"), |t| t.dimmed().to_string())
                ));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            ));
            for suggestion in &suggestions {
                out.push_str(&format!("  - {suggestion}\n"));
            }
        }

        if !verbose && self.source().is_some() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Re-run with -v to see the cause.", |t| t.dimmed().to_string())
            ));
        }
        out
    }

    /// Every error below this one in the source chain.
    fn causes(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        std::iter::successors(self.source(), |&e| e.source())
    }

    /// Record the failure with tracing before it is printed.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, exit_code = self.exit_code(), "{}", self);
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, exit_code = self.exit_code(), "{}", self);
            }
        }
        for cause in self.causes() {
            tracing::debug!("caused by: {cause}");
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli ───────────────────────────────────────────────────────────────────

/// Attach a call-site description to an I/O failure.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaingen_core::application::ApplicationError;
    use chaingen_core::domain::DomainError;
    use std::io;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn core_suggestions_are_forwarded() {
        let err = CliError::Core(
            DomainError::InvalidOption {
                name: "fPIC".into(),
                reason: "'maybe' is not a boolean".into(),
            }
            .into(),
        );
        assert!(err.suggestions().iter().any(|s| s.contains("fPIC")));
    }

    #[test]
    fn invalid_profile_mentions_tables() {
        let err = CliError::InvalidProfile {
            path: PathBuf::from("p.toml"),
            message: "expected a table".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("[settings]")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidProfile {
                path: PathBuf::from("p.toml"),
                message: "x".into(),
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(
            CliError::ProfileNotFound {
                path: PathBuf::from("missing.toml")
            }
            .exit_code(),
            3
        );
        let missing_template = CliError::Core(
            DomainError::TemplateNotFound {
                os: "Linux".into(),
                dedicated: "linux.toolchain.cmake.tmpl".into(),
                fallback: "generic.toolchain.cmake.tmpl".into(),
            }
            .into(),
        );
        assert_eq!(missing_template.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        let bad_store = CliError::Core(
            ApplicationError::TemplateStore {
                location: "/nope".into(),
                reason: "not a directory".into(),
            }
            .into(),
        );
        assert_eq!(bad_store.exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn render_lists_suggestions() {
        let err = CliError::ProfileNotFound {
            path: PathBuf::from("/tmp/x.toml"),
        };
        let s = err.render(false, false);
        assert!(s.starts_with("\nerror: Profile not found: /tmp/x.toml"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("  - No file at '/tmp/x.toml'"));
        assert!(!s.contains("Re-run with -v"));
    }

    #[test]
    fn render_shows_causes_only_when_verbose() {
        let err = CliError::IoError {
            message: "writing toolchain".into(),
            source: io::Error::other("disk full"),
        };
        assert!(err.render(false, false).contains("Re-run with -v"));

        let verbose = err.render(true, false);
        assert!(verbose.contains("caused by: disk full"));
        assert!(!verbose.contains("Re-run with -v"));
    }

    #[test]
    fn plain_render_has_no_escape_codes() {
        let err = CliError::ConfigError {
            message: "bad".into(),
            source: None,
        };
        assert!(!err.render(true, false).contains('\u{1b}'));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading profile");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading profile"));
    }
}
