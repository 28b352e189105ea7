//! Configuration loader: merges env vars, .env file, and config.toml.

use common::{Error, GatewayConfig};
use std::path::Path;

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered != "0" && lowered != "false" && lowered != "no" && lowered != "off"
}

fn parse_port(raw: &str, env_name: &str) -> Result<u16, Error> {
    let parsed = raw
        .trim()
        .parse::<u16>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer in 1..=65535")))?;
    if parsed == 0 {
        return Err(Error::Config(format!(
            "{env_name} must be an integer in 1..=65535"
        )));
    }
    Ok(parsed)
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.server.port == 0 {
        issues.push("server.port must be > 0".into());
    }
    if config.server.bind_addr.trim().is_empty() {
        issues.push("server.bind_addr must not be empty".into());
    }
    if config.log_filter.trim().is_empty() {
        issues.push("log_filter must not be empty".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply environment overrides read through `lookup`.
///
/// Blank values are ignored, so `PORT=` keeps the configured port.
fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), Error>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = var("PORT") {
        config.server.port = parse_port(&port, "PORT")?;
    }
    if let Some(addr) = var("BIND_ADDR") {
        config.server.bind_addr = addr.trim().to_string();
    }
    if let Some(filter) = var("LOG_FILTER") {
        config.log_filter = filter;
    }
    if let Some(raw) = var("FORECAST_SINGLE_FLIGHT") {
        config.cache.single_flight = parse_bool(&raw);
    }
    if let Some(raw) = var("FORECAST_RETRY_ON_FAILURE") {
        config.cache.retry_on_failure = parse_bool(&raw);
    }

    Ok(())
}

/// Load gateway configuration from environment and optional config file.
///
/// `port_override` comes from the command line and wins over everything else.
pub fn load_config(port_override: Option<u16>) -> Result<GatewayConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = GatewayConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables.
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    // 5. Command line flags (highest priority).
    if let Some(port) = port_override {
        config.server.port = port;
    }

    validate_config(&config)?;

    Ok(config)
}
