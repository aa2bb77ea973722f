//! Registry snapshots in client-side storage.
//!
//! Snapshots are written once per commit, never per frame. Each project has
//! its own key, `enigma-project-{project}`. A missing or unreadable snapshot
//! falls back to the default elements.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use crate::doc::{Registry, RegistrySnapshot};

/// Storage failure.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected the write: {0}")]
    Write(String),
    #[error("snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value storage (browser `localStorage` or an in-memory map).
pub trait SnapshotStore {
    /// # Errors
    ///
    /// Returns [`PersistError`] when the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// # Errors
    ///
    /// Returns [`PersistError`] when the backend refuses the write.
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// Storage key for a project's snapshot.
#[must_use]
pub fn snapshot_key(project: &str) -> String {
    format!("enigma-project-{project}")
}

/// Load a project's registry, falling back to the defaults.
#[must_use]
pub fn load_registry(store: &dyn SnapshotStore, project: &str) -> Registry {
    let key = snapshot_key(project);
    let text = match store.load(&key) {
        Ok(Some(text)) => text,
        Ok(None) => return Registry::with_defaults(),
        Err(e) => {
            log::warn!("persist: cannot read {key}: {e}");
            return Registry::with_defaults();
        }
    };
    match serde_json::from_str::<RegistrySnapshot>(&text) {
        Ok(snapshot) => {
            let mut registry = Registry::new();
            registry.load_snapshot(snapshot);
            registry
        }
        Err(e) => {
            log::warn!("persist: ignoring corrupt snapshot {key}: {e}");
            Registry::with_defaults()
        }
    }
}

/// Write a project's snapshot.
///
/// # Errors
///
/// Returns [`PersistError`] on encoding or storage failure.
pub fn save_registry(store: &mut dyn SnapshotStore, project: &str, snapshot: &RegistrySnapshot) -> Result<(), PersistError> {
    let text = serde_json::to_string(snapshot)?;
    store.save(&snapshot_key(project), &text)
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The browser's `localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Bind to the current window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Unavailable`] outside a browser or when
    /// storage is disabled.
    pub fn from_window() -> Result<Self, PersistError> {
        let Some(window) = web_sys::window() else {
            return Err(PersistError::Unavailable);
        };
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            _ => Err(PersistError::Unavailable),
        }
    }
}

impl SnapshotStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.storage.get_item(key).map_err(|_| PersistError::Unavailable)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PersistError::Write(e.as_string().unwrap_or_else(|| format!("{e:?}"))))
    }
}
