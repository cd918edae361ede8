//! Infrastructure adapters for Chaingen.
//!
//! This crate implements the ports defined in `chaingen-core::application::ports`.
//! It contains all external dependencies and I/O operations, and ships the
//! built-in CMake templates.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod system;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{EchoRenderer, MiniJinjaRenderer};
pub use system::NumCpus;
pub use template_store::{DirectoryStore, InMemoryStore};
