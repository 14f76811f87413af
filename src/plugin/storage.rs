//! Persistent plugin data

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors raised while reading or writing plugin data
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access plugin data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("plugin data at {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loosely typed key/value storage for a single plugin
pub trait PluginStorage {
    /// Load the persisted data. `Ok(None)` means nothing was saved yet.
    fn load_data(&self) -> Result<Option<Value>, StorageError>;

    /// Overwrite the persisted data
    fn save_data(&mut self, data: &Value) -> Result<(), StorageError>;
}

/// Stores plugin data as `data.json` inside the plugin's directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(plugin_dir: &Path) -> Self {
        Self {
            path: plugin_dir.join("data.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StorageError {
        StorageError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl PluginStorage for JsonFileStorage {
    fn load_data(&self) -> Result<Option<Value>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data = serde_json::from_str(&content).map_err(|e| self.json_error(e))?;
        Ok(Some(data))
    }

    fn save_data(&mut self, data: &Value) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(data).map_err(|e| self.json_error(e))?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))?;

        tracing::debug!("Saved plugin data to: {}", self.path.display());
        Ok(())
    }
}

/// In-memory storage whose contents stay observable through a shared handle
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub data: std::rc::Rc<std::cell::RefCell<Option<Value>>>,
    pub saves: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn with_data(data: Value) -> Self {
        let storage = Self::default();
        *storage.data.borrow_mut() = Some(data);
        storage
    }
}

#[cfg(test)]
impl PluginStorage for MemoryStorage {
    fn load_data(&self) -> Result<Option<Value>, StorageError> {
        Ok(self.data.borrow().clone())
    }

    fn save_data(&mut self, data: &Value) -> Result<(), StorageError> {
        *self.data.borrow_mut() = Some(data.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
