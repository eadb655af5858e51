//! Explicit query cache for fetched purchase order data.
//!
//! The cache is an owned value passed to whoever needs it; there is no global
//! instance. Freshness is measured against a caller-supplied `now`, which keeps
//! every operation deterministic. After any state-changing call the backend
//! confirms, call [`QueryCache::invalidate_purchase_order`] and re-fetch: the
//! cache never applies optimistic updates.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::enums::PoStatus;

/// Parameters of a purchase order list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListParams {
    pub status: Option<PoStatus>,
    pub vendor_id: Option<String>,
    pub search: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

/// What a cached value answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    PurchaseOrder(String),
    PurchaseOrderList(ListParams),
    AuditLog(String),
    StatusHistory(String),
    EmailLog(String),
}

impl CacheKey {
    /// The purchase order this key belongs to, if it is per-order.
    #[must_use]
    pub fn purchase_order_id(&self) -> Option<&str> {
        match self {
            Self::PurchaseOrder(id)
            | Self::AuditLog(id)
            | Self::StatusHistory(id)
            | Self::EmailLog(id) => Some(id),
            Self::PurchaseOrderList(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedQuery<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Query cache keyed by [`CacheKey`].
///
/// Entries older than `stale_after` are treated as absent. When `max_entries`
/// is reached the oldest fetch is evicted first.
#[derive(Debug)]
pub struct QueryCache<V> {
    entries: HashMap<CacheKey, CachedQuery<V>>,
    stale_after: Duration,
    max_entries: usize,
    stats: CacheStats,
}

impl<V> QueryCache<V> {
    #[must_use]
    pub fn new(stale_after: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            max_entries: max_entries.max(1),
            stats: CacheStats::default(),
        }
    }

    pub fn insert(&mut self, key: CacheKey, value: V, now: DateTime<Utc>) {
        self.make_room_for(&key);
        self.entries.insert(
            key,
            CachedQuery {
                value,
                fetched_at: now,
            },
        );
    }

    /// Fresh value for `key`, or `None` if absent or stale.
    pub fn get(&mut self, key: &CacheKey, now: DateTime<Utc>) -> Option<&V> {
        let fresh = self
            .entries
            .get(key)
            .is_some_and(|entry| now - entry.fetched_at < self.stale_after);

        if fresh {
            self.stats.hits += 1;
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Return the fresh value or fetch, store and return a new one.
    ///
    /// # Errors
    ///
    /// Propagates the error from `fetch`; nothing is cached on failure.
    pub fn get_or_fetch<E, F>(&mut self, key: CacheKey, now: DateTime<Utc>, fetch: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if self.get(&key, now).is_some() {
            return Ok(&self.entries[&key].value);
        }

        let value = fetch()?;
        self.make_room_for(&key);
        let slot = self.entries.entry(key).insert_entry(CachedQuery {
            value,
            fetched_at: now,
        });
        Ok(&slot.into_mut().value)
    }

    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every per-order key for `po_id` and every list query.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_purchase_order(&mut self, po_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| match key {
            CacheKey::PurchaseOrderList(_) => false,
            other => other.purchase_order_id() != Some(po_id),
        });
        let removed = before - self.entries.len();
        tracing::debug!(po_id, removed, "invalidated purchase order queries");
        removed
    }

    /// Drop every list query, keeping per-order entries.
    pub fn invalidate_lists(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !matches!(key, CacheKey::PurchaseOrderList(_)));
        before - self.entries.len()
    }

    /// Remove stale entries. Returns the number removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let stale_after = self.stale_after;
        self.entries
            .retain(|_, entry| now - entry.fetched_at < stale_after);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    fn make_room_for(&mut self, key: &CacheKey) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.fetched_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.evictions += 1;
        }
    }
}
