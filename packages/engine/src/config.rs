use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::graph::DEFAULT_MATCH_THRESHOLD;

/// Engine configuration loaded from environment variables.
///
/// Everything has a default; the engine runs unconfigured.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum match score for a match connection to be emitted.
    pub match_threshold: f64,
    /// Per-topic channel capacity of the stream hub.
    pub hub_capacity: usize,
    /// How often a session re-evaluates expiry and republishes, in seconds.
    pub refresh_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            match_threshold: match env::var("MATCH_THRESHOLD") {
                Ok(value) => value
                    .parse()
                    .context("MATCH_THRESHOLD must be a valid number")?,
                Err(_) => DEFAULT_MATCH_THRESHOLD,
            },
            hub_capacity: match env::var("HUB_CAPACITY") {
                Ok(value) => value.parse().context("HUB_CAPACITY must be a valid number")?,
                Err(_) => 256,
            },
            refresh_interval_secs: match env::var("REFRESH_INTERVAL_SECS") {
                Ok(value) => value
                    .parse()
                    .context("REFRESH_INTERVAL_SECS must be a valid number")?,
                Err(_) => 1,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            hub_capacity: 256,
            refresh_interval_secs: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.match_threshold, 0.2);
        assert_eq!(config.hub_capacity, 256);
        assert_eq!(config.refresh_interval_secs, 1);
    }
}
