//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use chaingen_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::ChaingenResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory template store.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> ChaingenResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in templates, replacing any of the same name.
    pub fn load_builtin(&self) -> ChaingenResult<()> {
        for (name, source) in builtin_templates::all() {
            self.insert(name, source)?;
        }
        Ok(())
    }

    /// Insert or replace a template.
    pub fn insert(&self, name: impl Into<String>, source: impl Into<String>) -> ChaingenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(name.into(), source.into());
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, name: &str) -> ChaingenResult<Option<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(name).cloned())
    }

    fn list(&self) -> ChaingenResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.keys().cloned().collect())
    }
}
