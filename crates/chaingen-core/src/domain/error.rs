// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: String, reason: String },

    #[error("Invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    #[error("Invalid variable name '{name}': {reason}")]
    InvalidVariableName { name: String, reason: String },

    #[error("Invalid configuration name '{name}'")]
    InvalidConfiguration { name: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("No toolchain template for os '{os}' (looked for '{dedicated}' and '{fallback}')")]
    TemplateNotFound {
        os: String,
        dedicated: String,
        fallback: String,
    },

    #[error("Project include template '{name}' not found")]
    ProjectIncludeTemplateNotFound { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSetting { name, .. } => vec![
                format!("Check the value of setting '{}'", name),
                "Settings are given as KEY=VALUE, e.g. -s compiler.version=9".into(),
            ],
            Self::InvalidOption { name, .. } => vec![
                format!("Option '{}' must be a boolean", name),
                "Accepted spellings: True/False, true/false, ON/OFF, 1/0".into(),
            ],
            Self::InvalidVariableName { name, reason } => vec![
                format!("'{}' cannot be used as a CMake variable: {}", name, reason),
                "Use letters, digits, '_', '.', '+' and '-' only".into(),
            ],
            Self::TemplateNotFound { fallback, .. } => vec![
                "No dedicated template exists for this OS".into(),
                format!("Provide '{}' in your template directory", fallback),
                "Or drop --template-dir to use the built-in templates".into(),
            ],
            Self::ProjectIncludeTemplateNotFound { name } => vec![
                format!("Provide '{}' in your template directory", name),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSetting { .. }
            | Self::InvalidOption { .. }
            | Self::InvalidVariableName { .. }
            | Self::InvalidConfiguration { .. } => ErrorCategory::Validation,
            Self::TemplateNotFound { .. } | Self::ProjectIncludeTemplateNotFound { .. } => {
                ErrorCategory::NotFound
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
