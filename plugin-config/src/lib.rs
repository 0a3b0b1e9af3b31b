//! # Plugin Configuration
//!
//! Process-wide store of installed CLI plugins (name → executable location).
//!
//! ## Overview
//!
//! - Data is loaded from storage once, on first access, whichever of read or
//!   write comes first
//! - Reads share a read lock; writes take the write lock and persist before
//!   releasing it
//! - Storage failures never abort the caller; they are reported to an error
//!   handler supplied at construction and the store keeps serving from memory
//!
//! ## Storage
//!
//! By default the store lives at `$CF_PLUGIN_HOME/.cf/plugins/config.json`,
//! falling back to `$HOME` when `CF_PLUGIN_HOME` is unset:
//!
//! ```json
//! { "Plugins": { "my-plugin": "/home/me/.cf/plugins/my-plugin" } }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use plugin_config::PluginConfig;
//!
//! let config = PluginConfig::new(|err| eprintln!("plugin config: {}", err));
//!
//! config.set_plugin("my-plugin", "/usr/local/bin/my-plugin");
//! assert!(config.plugins().contains_key("my-plugin"));
//! ```

pub mod config;
pub mod error;
pub mod persistor;

// Re-export main types
pub use config::{plugin_home_dir, PluginConfig, PluginData};
pub use error::{PluginConfigError, PluginConfigResult};
pub use persistor::{DiskPersistor, MemoryPersistor, Persistor};
