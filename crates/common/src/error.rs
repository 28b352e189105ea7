//! Unified error type for the surf gateway.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Forecast computation failed for {spot_id}: {message}")]
    Forecast { spot_id: String, message: String },
}

impl Error {
    /// Build a computation failure for `spot_id`.
    pub fn forecast(spot_id: &str, message: impl Into<String>) -> Self {
        Error::Forecast {
            spot_id: spot_id.to_string(),
            message: message.into(),
        }
    }
}
