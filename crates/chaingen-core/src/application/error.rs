//! Application layer errors.
//!
//! These errors represent failures in orchestration, not toolchain logic.
//! Toolchain logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template rendering failed (syntax error, unknown include, bad context).
    #[error("Rendering '{template}' failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,

    /// A template store could not be read.
    #[error("Template store error at {location}: {reason}")]
    TemplateStore { location: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the syntax of template '{}'", template),
                "Run with -vv to see the render context".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::TemplateStore { location, .. } => vec![
                format!("Check that '{}' is a readable directory", location),
                "Run: chaingen templates --template-dir <DIR> to inspect it".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::TemplateStore { .. } => ErrorCategory::Configuration,
        }
    }
}
