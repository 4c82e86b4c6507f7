use anyhow::{Context, Result};

use crate::positions::PositionKey;

const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Profile used when a request names no position.
    pub default_position: PositionKey,
    /// Upper bound for request bodies (base64 documents included).
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            default_position: PositionKey::PythonDeveloper,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: optional_env("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            default_position: optional_env("DEFAULT_POSITION")
                .map(|v| v.parse::<PositionKey>())
                .transpose()
                .context("DEFAULT_POSITION must name a known position")?
                .unwrap_or(defaults.default_position),
            max_body_bytes: optional_env("MAX_BODY_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_BODY_BYTES must be a byte count")?
                .unwrap_or(defaults.max_body_bytes),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
