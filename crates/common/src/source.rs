//! The forecast computation seam consumed by the cache service.

use async_trait::async_trait;

use crate::types::ForecastRecord;
use crate::Result;

/// Produces a fresh forecast for a spot.
///
/// Implementations stamp `generated_at` themselves. A failure must be
/// returned as an error rather than a placeholder record, so callers can
/// decline to cache it.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn compute(&self, spot_id: &str) -> Result<ForecastRecord>;
}
