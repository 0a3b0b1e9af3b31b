//! Aggregator configuration.
//!
//! Loaded from environment variables with defaults that reproduce plain
//! sequential querying.

use serde::{Deserialize, Serialize};

/// Environment variable enabling concurrent prefetch.
pub const CONCURRENT_PREFETCH_VAR: &str = "MARKETPLACE_CONCURRENT_PREFETCH";

/// Configuration for [`ServiceActor`](crate::ServiceActor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Fetch visibility grants and organizations concurrently.
    ///
    /// Neither query depends on the other, so results are identical either
    /// way; only latency changes.
    pub concurrent_prefetch: bool,
}

impl VisibilityConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MARKETPLACE_CONCURRENT_PREFETCH`: `true`/`1` to prefetch concurrently (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        Self {
            concurrent_prefetch: lookup(CONCURRENT_PREFETCH_VAR)
                .map(|s| matches!(s.trim().to_lowercase().as_str(), "true" | "1"))
                .unwrap_or(default.concurrent_prefetch),
        }
    }

    /// Enable or disable concurrent prefetch.
    pub fn with_concurrent_prefetch(mut self, enabled: bool) -> Self {
        self.concurrent_prefetch = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VisibilityConfig::default();
        assert!(!config.concurrent_prefetch);
    }

    #[test]
    fn test_from_lookup() {
        let enabled = VisibilityConfig::from_lookup(|key| {
            (key == CONCURRENT_PREFETCH_VAR).then(|| "TRUE".to_string())
        });
        assert!(enabled.concurrent_prefetch);

        let one = VisibilityConfig::from_lookup(|_| Some("1".to_string()));
        assert!(one.concurrent_prefetch);

        let off = VisibilityConfig::from_lookup(|_| Some("yes please".to_string()));
        assert!(!off.concurrent_prefetch);

        let unset = VisibilityConfig::from_lookup(|_| None);
        assert_eq!(unset, VisibilityConfig::default());
    }
}
