//! Plugin configuration store
//!
//! The store is meant to be shared process-wide. Whichever access comes
//! first, read or write, loads the persisted data exactly once; every write
//! is persisted while the write lock is still held.

use parking_lot::{Once, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::PluginConfigError;
use crate::persistor::{DiskPersistor, Persistor};

/// Environment variable overriding the plugin home directory.
pub const PLUGIN_HOME_VAR: &str = "CF_PLUGIN_HOME";

/// Persisted plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginData {
    /// Installed plugins: name → executable location
    #[serde(rename = "Plugins", default)]
    pub plugins: BTreeMap<String, String>,
}

/// Resolve the directory plugin state lives under.
///
/// Uses `CF_PLUGIN_HOME`, then `HOME`, then the current directory.
pub fn plugin_home_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|dir| !dir.is_empty());

    non_empty(PLUGIN_HOME_VAR)
        .or_else(|| non_empty("HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

type ErrorHandler = Box<dyn Fn(PluginConfigError) + Send + Sync>;

/// Lock-guarded, lazily loaded plugin configuration.
///
/// # Examples
///
/// ```
/// use plugin_config::{MemoryPersistor, PluginConfig};
/// use std::sync::Arc;
///
/// let storage = Arc::new(MemoryPersistor::default());
/// let config = PluginConfig::with_persistor(storage.clone(), "/tmp/plugins", |_| {});
///
/// config.set_plugin("my-plugin", "/tmp/plugins/my-plugin");
/// assert_eq!(storage.stored().plugins["my-plugin"], "/tmp/plugins/my-plugin");
/// ```
pub struct PluginConfig {
    data: RwLock<PluginData>,
    init: Once,
    persistor: Arc<dyn Persistor>,
    on_error: ErrorHandler,
    plugin_path: PathBuf,
}

impl std::fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginConfig")
            .field("plugin_path", &self.plugin_path)
            .field("loaded", &self.init.state().done())
            .finish()
    }
}

impl PluginConfig {
    /// Create a store backed by `config.json` in the default plugin directory.
    pub fn new<E>(on_error: E) -> Self
    where
        E: Fn(PluginConfigError) + Send + Sync + 'static,
    {
        let plugin_path = plugin_home_dir(|key| std::env::var(key).ok())
            .join(".cf")
            .join("plugins");
        let persistor = Arc::new(DiskPersistor::new(plugin_path.join("config.json")));

        Self::with_persistor(persistor, plugin_path, on_error)
    }

    /// Create a store over an explicit persistor and plugin directory.
    pub fn with_persistor<E>(
        persistor: Arc<dyn Persistor>,
        plugin_path: impl Into<PathBuf>,
        on_error: E,
    ) -> Self
    where
        E: Fn(PluginConfigError) + Send + Sync + 'static,
    {
        Self {
            data: RwLock::new(PluginData::default()),
            init: Once::new(),
            persistor,
            on_error: Box::new(on_error),
            plugin_path: plugin_path.into(),
        }
    }

    /// Directory installed plugins live in.
    pub fn plugin_path(&self) -> &Path {
        &self.plugin_path
    }

    /// Every installed plugin.
    pub fn plugins(&self) -> BTreeMap<String, String> {
        self.ensure_loaded();
        self.data.read().plugins.clone()
    }

    /// Location of a single plugin.
    pub fn plugin(&self, name: &str) -> Option<String> {
        self.ensure_loaded();
        self.data.read().plugins.get(name).cloned()
    }

    /// Record a plugin and persist.
    pub fn set_plugin(&self, name: impl Into<String>, location: impl Into<String>) {
        let (name, location) = (name.into(), location.into());
        self.write(|data| {
            data.plugins.insert(name, location);
        });
    }

    /// Forget a plugin and persist.
    pub fn remove_plugin(&self, name: &str) {
        self.write(|data| {
            data.plugins.remove(name);
        });
    }

    /// Load persisted data on first access.
    fn ensure_loaded(&self) {
        self.init.call_once(|| match self.persistor.load() {
            Ok(loaded) => {
                debug!(plugins = loaded.plugins.len(), "Plugin configuration loaded");
                *self.data.write() = loaded;
            }
            Err(e) => (self.on_error)(e),
        });
    }

    /// Mutate under the write lock, then persist before releasing it.
    fn write<F>(&self, mutate: F)
    where
        F: FnOnce(&mut PluginData),
    {
        self.ensure_loaded();

        let mut data = self.data.write();
        mutate(&mut data);

        if let Err(e) = self.persistor.save(&data) {
            (self.on_error)(e);
        }
    }
}
