use std::sync::{Arc, RwLock};

use super::store::BundleStore;
use super::BundleError;

/// In-memory bundle store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryBundleStore {
    inner: Arc<RwLock<Option<String>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryBundleStoreError {
    #[error("memory store error: {0}")]
    Internal(String),
}

impl MemoryBundleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `contents`
    pub fn from_contents(contents: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(contents.into()))),
        }
    }
}

fn poisoned(e: impl std::fmt::Display) -> BundleError<MemoryBundleStoreError> {
    BundleError::Store(MemoryBundleStoreError::Internal(format!(
        "failed to acquire lock: {}",
        e
    )))
}

impl BundleStore for MemoryBundleStore {
    type Error = MemoryBundleStoreError;

    fn exists(&self) -> Result<bool, BundleError<Self::Error>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.is_some())
    }

    fn read(&self) -> Result<Option<String>, BundleError<Self::Error>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.clone())
    }

    fn write_new(&self, contents: &str) -> Result<(), BundleError<Self::Error>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.is_some() {
            return Err(BundleError::AlreadyExists);
        }
        *inner = Some(contents.to_string());
        Ok(())
    }
}
