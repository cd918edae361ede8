//! The one error type the core hands out, wrapping domain and application
//! failures.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone)]
pub enum ChaingenError {
    /// Bad input or a template that cannot be resolved.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Rendering, filesystem and template store failures.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl ChaingenError {
    /// Hints for the user, most useful first.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Coarse classification; the CLI turns it into an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

pub type ChaingenResult<T> = Result<T, ChaingenError>;
