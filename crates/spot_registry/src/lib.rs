//! Spot registry and the local forecast source.
//!
//! No upstream provider is contacted: forecasts are assembled from the static
//! spot table and stamped with the current time.

pub mod spots;

pub use spots::{
    find_spot, lookup_conditions, lookup_location, SpotProfile, SPOTS, UNKNOWN_LOCATION,
};

use async_trait::async_trait;
use common::{Clock, ForecastRecord, ForecastSource, Result};
use std::sync::Arc;
use tracing::debug;

/// Forecast source backed by the static spot table.
#[derive(Debug, Clone)]
pub struct MockForecaster {
    clock: Arc<dyn Clock>,
}

impl MockForecaster {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Build a record for `spot_id`. Unknown ids get placeholder fields.
    pub fn build_record(&self, spot_id: &str) -> ForecastRecord {
        let location = lookup_location(spot_id);
        let conditions = lookup_conditions(spot_id);

        ForecastRecord {
            spot_id: spot_id.to_string(),
            location: location.to_string(),
            wave_height: conditions.wave_height.to_string(),
            wind_speed: conditions.wind_speed.to_string(),
            wind_direction: conditions.wind_direction.to_string(),
            tide: conditions.tide.to_string(),
            generated_at: self.clock.now_epoch_secs(),
        }
    }
}

#[async_trait]
impl ForecastSource for MockForecaster {
    async fn compute(&self, spot_id: &str) -> Result<ForecastRecord> {
        let record = self.build_record(spot_id);
        debug!(
            spot_id,
            location = %record.location,
            generated_at = record.generated_at,
            "Built forecast"
        );
        Ok(record)
    }
}
