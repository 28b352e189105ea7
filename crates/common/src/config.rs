//! Gateway configuration types.

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Default `tracing` filter, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Forecast cache behaviour.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Cache request-path options. The TTL itself is fixed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Collapse concurrent misses on one spot into a single computation.
    #[serde(default)]
    pub single_flight: bool,

    /// Retry a failed computation once, without backoff.
    #[serde(default)]
    pub retry_on_failure: bool,
}

fn default_log_filter() -> String {
    "surf_gateway=info,forecast_cache=info,spot_registry=info".into()
}
fn default_bind_addr() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}
