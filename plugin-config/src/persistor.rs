//! Storage backends for plugin configuration

use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use crate::config::PluginData;
use crate::error::{PluginConfigError, PluginConfigResult};

/// Loads and saves plugin configuration data.
pub trait Persistor: Send + Sync {
    /// Load the stored data. Missing storage yields empty data.
    fn load(&self) -> PluginConfigResult<PluginData>;

    /// Replace the stored data.
    fn save(&self, data: &PluginData) -> PluginConfigResult<()>;
}

/// JSON file storage.
#[derive(Debug, Clone)]
pub struct DiskPersistor {
    path: PathBuf,
}

impl DiskPersistor {
    /// Create a persistor for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PluginConfigError {
        PluginConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persistor for DiskPersistor {
    fn load(&self) -> PluginConfigResult<PluginData> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No plugin configuration on disk");
                return Ok(PluginData::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&contents).map_err(|source| PluginConfigError::Serialization {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, data: &PluginData) -> PluginConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_vec_pretty(data).map_err(|source| {
            PluginConfigError::Serialization {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), plugins = data.plugins.len(), "Plugin configuration saved");
        Ok(())
    }
}

/// In-memory storage that counts loads and saves.
#[derive(Debug, Default)]
pub struct MemoryPersistor {
    stored: Mutex<PluginData>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryPersistor {
    /// Create storage holding `data`.
    pub fn with_data(data: PluginData) -> Self {
        Self {
            stored: Mutex::new(data),
            ..Self::default()
        }
    }

    /// The currently stored data.
    pub fn stored(&self) -> PluginData {
        self.stored.lock().clone()
    }

    /// Number of loads served.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of saves accepted.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Persistor for MemoryPersistor {
    fn load(&self) -> PluginConfigResult<PluginData> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored.lock().clone())
    }

    fn save(&self, data: &PluginData) -> PluginConfigResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock() = data.clone();
        Ok(())
    }
}
