//! Shared types, config, and error definitions for the surf gateway.

pub mod clock;
pub mod config;
pub mod error;
pub mod source;
pub mod types;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use config::GatewayConfig;
pub use error::Error;
pub use source::ForecastSource;
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
