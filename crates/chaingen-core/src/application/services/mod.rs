//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a toolchain" or "list templates".

pub mod template_selector;
pub mod toolchain_service;
pub mod toolchain_writer;

pub use template_selector::{SelectedTemplate, TemplatePair, TemplateSelection, TemplateSelector};
pub use toolchain_service::{GenerationReport, TemplateInfo, ToolchainService};
pub use toolchain_writer::{OutputPaths, RenderedToolchain, ToolchainWriter};
