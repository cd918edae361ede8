//! Filesystem-backed template store.
//!
//! Serves templates from a user directory, with the same names the built-in
//! store uses:
//!
//! ```text
//! my-templates/
//! ├── generic.toolchain.cmake.tmpl
//! ├── linux.toolchain.cmake.tmpl
//! ├── project_include.cmake.tmpl
//! └── blocks/
//!     └── variables.cmake
//! ```
//!
//! Files are read on every lookup, so edits show up without restarting.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use chaingen_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::ChaingenResult,
};

/// Templates read from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::TemplateStore`] if `root` is not a
    /// directory.
    pub fn open(root: impl Into<PathBuf>) -> ChaingenResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(store_error(&root, "not a directory"));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` below the root. Names escaping the root resolve to
    /// nothing.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            warn!(template = name, "rejecting template name outside the store");
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl TemplateStore for DirectoryStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn get(&self, name: &str) -> ChaingenResult<Option<String>> {
        let Some(path) = self.resolve(name) else {
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(source) => {
                debug!(path = %path.display(), "loaded template");
                Ok(Some(source))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_error(&path, &e.to_string())),
        }
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self) -> ChaingenResult<Vec<String>> {
        let mut names = Vec::new();

        for walk_entry in WalkDir::new(&self.root).min_depth(1) {
            let walk_entry = walk_entry.map_err(|e| store_error(&self.root, &e.to_string()))?;
            if !walk_entry.file_type().is_file() {
                continue;
            }
            let relative = walk_entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| store_error(walk_entry.path(), &e.to_string()))?;
            names.push(normalize_path(&relative.to_string_lossy()));
        }

        names.sort();
        debug!(count = names.len(), "listed templates");
        Ok(names)
    }
}

/// Forward slashes, so names match on every platform.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn store_error(path: &Path, reason: &str) -> chaingen_core::error::ChaingenError {
    ApplicationError::TemplateStore {
        location: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}
