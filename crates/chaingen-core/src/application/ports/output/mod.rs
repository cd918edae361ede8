//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `chaingen-adapters` crate provides implementations.

use std::{path::Path, sync::Arc};

use crate::domain::RenderContext;
use crate::error::ChaingenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `chaingen_adapters::filesystem::LocalFilesystem` (production)
/// - `chaingen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ChaingenResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> ChaingenResult<()>;

    /// Delete a file. Used to take back a write when its partner fails.
    fn remove_file(&self, path: &Path) -> ChaingenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template source lookup.
///
/// Templates are addressed by file name (`generic.toolchain.cmake.tmpl`,
/// `blocks/cppstd.cmake`, ...).
///
/// Implemented by:
/// - `chaingen_adapters::template_store::InMemoryStore` (built-in templates)
/// - `chaingen_adapters::template_store::DirectoryStore` (user templates)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Source of the template called `name`, `Ok(None)` when it does not exist.
    fn get(&self, name: &str) -> ChaingenResult<Option<String>>;

    /// Names of every template, sorted.
    fn list(&self) -> ChaingenResult<Vec<String>>;
}

/// Lets one shared store back both template selection and include lookups.
impl<T: TemplateStore + ?Sized> TemplateStore for Arc<T> {
    fn get(&self, name: &str) -> ChaingenResult<Option<String>> {
        (**self).get(name)
    }

    fn list(&self) -> ChaingenResult<Vec<String>> {
        (**self).list()
    }
}

/// Port for template rendering.
///
/// Implemented by:
/// - `chaingen_adapters::renderer::MiniJinjaRenderer` (Jinja templates)
/// - `chaingen_adapters::renderer::EchoRenderer` (stub for tests)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render template `name` whose text is `source`.
    ///
    /// # Arguments
    ///
    /// * `name` - Template name, used in error messages and include lookups
    /// * `source` - Template text
    /// * `context` - Values and helper visible to the template
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> ChaingenResult<String>;
}

/// Port for the number of parallel compile jobs.
#[cfg_attr(test, mockall::automock)]
pub trait CpuCount: Send + Sync {
    fn cpu_count(&self) -> usize;
}
