//! Query cache configuration.
//!
//! Sizes the [`QueryCache`] that applications embedding `po-core` keep
//! between fetches. `poadm` reads each record once per run, so it validates
//! and prints this section but never builds a cache from it.

use chrono::Duration;
use po_core::cache::QueryCache;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_stale_after_secs() -> u64 {
    30
}

const fn default_max_entries() -> usize {
    256
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds a fetched result stays fresh.
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,

    /// Entry count at which the oldest fetch is evicted.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: default_stale_after_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Freshness window as a duration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the window does not fit a
    /// signed duration.
    pub fn stale_after(&self) -> Result<Duration, ConfigError> {
        i64::try_from(self.stale_after_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "cache.stale_after_secs".into(),
                reason: format!("{} seconds is out of range", self.stale_after_secs),
            })
    }

    /// Build an empty cache with these settings.
    ///
    /// # Errors
    ///
    /// See [`CacheConfig::stale_after`].
    pub fn build<V>(&self) -> Result<QueryCache<V>, ConfigError> {
        Ok(QueryCache::new(self.stale_after()?, self.max_entries))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.stale_after_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.stale_after_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.max_entries".into(),
                reason: "must be greater than zero".into(),
            });
        }
        self.stale_after().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = CacheConfig::default();
        assert_eq!(config.stale_after_secs, 30);
        assert_eq!(config.max_entries, 256);
        assert_eq!(config.stale_after().unwrap(), Duration::seconds(30));
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = CacheConfig {
            stale_after_secs: 0,
            ..CacheConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "cache.stale_after_secs"
        ));
    }

    #[test]
    fn oversized_window_is_rejected() {
        let config = CacheConfig {
            stale_after_secs: u64::MAX,
            ..CacheConfig::default()
        };
        assert!(config.stale_after().is_err());
    }

    #[test]
    fn build_returns_empty_cache() {
        let cache = CacheConfig::default().build::<String>().unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn built_cache_uses_configured_window_and_capacity() {
        use chrono::{TimeZone, Utc};
        use po_core::cache::CacheKey;

        let config = CacheConfig {
            stale_after_secs: 5,
            max_entries: 1,
        };
        let mut cache = config.build::<&str>().unwrap();
        let t0 = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();

        cache.insert(CacheKey::PurchaseOrder("po-1".into()), "first", t0);
        cache.insert(CacheKey::PurchaseOrder("po-2".into()), "second", t0);
        assert_eq!(cache.len(), 1);

        let key = CacheKey::PurchaseOrder("po-2".into());
        assert_eq!(cache.get(&key, t0 + Duration::seconds(4)), Some(&"second"));
        assert_eq!(cache.get(&key, t0 + Duration::seconds(6)), None);
    }
}
