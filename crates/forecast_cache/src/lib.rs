//! Forecast cache crate.
//!
//! Holds the shared TTL cache and the service that decides, per request,
//! whether to serve a cached forecast or compute a new one.

pub mod cache;
pub mod service;

pub use cache::{CacheEntry, ForecastCache};
pub use service::{ForecastService, CACHE_TTL_SECS};
