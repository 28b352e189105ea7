//! In-memory forecast cache.
//!
//! Uses `DashMap` so concurrent requests for different spots never contend,
//! and a read racing a write on one spot sees either the old or the new
//! entry whole.

use common::ForecastRecord;
use dashmap::DashMap;
use std::sync::Arc;

/// A cached forecast with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub record: ForecastRecord,
    /// Epoch seconds; the entry is fresh while `now < expires_at`.
    pub expires_at: i64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: i64) -> bool {
        self.expires_at > now
    }
}

/// Thread-safe forecast cache keyed by spot id. Cloning shares the map.
#[derive(Debug, Clone, Default)]
pub struct ForecastCache {
    entries: Arc<DashMap<String, CacheEntry>>,
}

impl ForecastCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached record for `spot_id` if it is still fresh at `now`.
    ///
    /// Stale entries are reported as absent but left in place; the next
    /// write for the same spot replaces them.
    pub fn get(&self, spot_id: &str, now: i64) -> Option<ForecastRecord> {
        self.entries
            .get(spot_id)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.record.clone())
    }

    /// Store an entry, replacing whatever was there.
    pub fn put(&self, spot_id: &str, entry: CacheEntry) {
        self.entries.insert(spot_id.to_string(), entry);
    }

    /// Raw entry for `spot_id`, fresh or not.
    pub fn entry(&self, spot_id: &str) -> Option<CacheEntry> {
        self.entries.get(spot_id).map(|entry| entry.clone())
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
