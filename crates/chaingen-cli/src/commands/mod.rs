//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod generate;
pub mod templates;

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use chaingen_adapters::{DirectoryStore, InMemoryStore};
use chaingen_core::prelude::TemplateStore;

use crate::error::CliResult;

/// Templates from `dir`, or the built-in set when no directory is given.
pub(crate) fn open_store(dir: Option<&Path>) -> CliResult<Arc<dyn TemplateStore>> {
    let store: Arc<dyn TemplateStore> = match dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using template directory");
            Arc::new(DirectoryStore::open(dir)?)
        }
        None => Arc::new(InMemoryStore::with_builtin()?),
    };
    Ok(store)
}
