//! Cache-then-compute request path.

use crate::cache::{CacheEntry, ForecastCache};
use common::config::CacheConfig;
use common::{Clock, ForecastRecord, ForecastSource, Result};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Lifetime of a cached forecast, shared by every spot.
pub const CACHE_TTL_SECS: i64 = 30 * 60;

/// Serves forecasts from the shared cache, recomputing on miss or bypass.
pub struct ForecastService {
    cache: ForecastCache,
    source: Arc<dyn ForecastSource>,
    clock: Arc<dyn Clock>,
    single_flight: bool,
    retry_on_failure: bool,
    /// Per-spot gates held while a single-flight computation runs.
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl ForecastService {
    pub fn new(
        cache: ForecastCache,
        source: Arc<dyn ForecastSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache,
            source,
            clock,
            single_flight: false,
            retry_on_failure: false,
            in_flight: DashMap::new(),
        }
    }

    /// Apply the request-path options from config.
    pub fn with_config(mut self, config: &CacheConfig) -> Self {
        self.single_flight = config.single_flight;
        self.retry_on_failure = config.retry_on_failure;
        self
    }

    pub fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Return the forecast for `spot_id`.
    ///
    /// A fresh cached record is returned as-is unless `bypass_cache` is set.
    /// Otherwise the source is consulted and its record replaces the cache
    /// entry, expiring `CACHE_TTL_SECS` after the time read at the start of
    /// this call. A failed computation is returned to the caller and leaves
    /// the cache untouched.
    pub async fn get_forecast(&self, spot_id: &str, bypass_cache: bool) -> Result<ForecastRecord> {
        let now = self.clock.now_epoch_secs();

        if bypass_cache {
            info!(spot_id, "Cache bypass requested");
            return self.refresh(spot_id, now).await;
        }

        if let Some(record) = self.cache.get(spot_id, now) {
            debug!(spot_id, "Cache hit");
            return Ok(record);
        }

        if self.single_flight {
            self.refresh_single_flight(spot_id, now).await
        } else {
            self.refresh(spot_id, now).await
        }
    }

    /// Miss path with at most one computation per spot in progress.
    async fn refresh_single_flight(&self, spot_id: &str, now: i64) -> Result<ForecastRecord> {
        let gate = InFlightGate::join(&self.in_flight, spot_id);
        let _guard = gate.lock().await;

        match self.cache.get(spot_id, now) {
            Some(record) => {
                debug!(spot_id, "Cache filled by concurrent request");
                Ok(record)
            }
            None => self.refresh(spot_id, now).await,
        }
    }

    async fn refresh(&self, spot_id: &str, now: i64) -> Result<ForecastRecord> {
        info!(spot_id, "Fetching fresh forecast");

        let record = self.compute(spot_id).await.map_err(|e| {
            warn!(spot_id, error = %e, "Forecast computation failed");
            e
        })?;

        self.cache.put(spot_id, CacheEntry {
            record: record.clone(),
            expires_at: now + CACHE_TTL_SECS,
        });

        Ok(record)
    }

    async fn compute(&self, spot_id: &str) -> Result<ForecastRecord> {
        match self.source.compute(spot_id).await {
            Ok(record) => Ok(record),
            Err(e) if self.retry_on_failure => {
                warn!(spot_id, error = %e, "Retrying forecast computation");
                self.source.compute(spot_id).await
            }
            Err(e) => Err(e),
        }
    }
}

/// A request's hold on a spot's single-flight gate.
///
/// Dropping it, on return or when the request future is cancelled, removes
/// the gate from the map once no other request holds it.
struct InFlightGate<'a> {
    in_flight: &'a DashMap<String, Arc<Mutex<()>>>,
    spot_id: &'a str,
    gate: Arc<Mutex<()>>,
}

impl<'a> InFlightGate<'a> {
    fn join(in_flight: &'a DashMap<String, Arc<Mutex<()>>>, spot_id: &'a str) -> Self {
        let gate = in_flight.entry(spot_id.to_string()).or_default().clone();
        Self {
            in_flight,
            spot_id,
            gate,
        }
    }

    async fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}

impl Drop for InFlightGate<'_> {
    fn drop(&mut self) {
        // Clones are only handed out under the map's shard lock, so a count
        // of two (map + this hold) means nobody else is waiting.
        self.in_flight.remove_if(self.spot_id, |_, gate| {
            Arc::ptr_eq(gate, &self.gate) && Arc::strong_count(gate) == 2
        });
    }
}
