//! Application layer for Chaingen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ToolchainService, TemplateSelector, ToolchainWriter)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! toolchain logic itself. All deduction rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerationReport, OutputPaths, RenderedToolchain, TemplateInfo, TemplateSelector,
    ToolchainService, ToolchainWriter,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CpuCount, Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
