//! Configuration module

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// External model service endpoint (None = rule-based only)
    pub model_service_url: Option<String>,

    /// Timeout for model service calls in seconds
    pub model_timeout_seconds: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            model_service_url: None,
            model_timeout_seconds: 30,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_service_url: env::var("MODEL_SERVICE_URL")
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),

            model_timeout_seconds: positive_secs(env::var("MODEL_TIMEOUT_SECONDS").ok())
                .unwrap_or(defaults.model_timeout_seconds),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_seconds)
    }
}

/// Whole seconds greater than zero; anything else is ignored
fn positive_secs(value: Option<String>) -> Option<u64> {
    value
        .and_then(|s| s.trim().parse().ok())
        .filter(|secs| *secs > 0)
}
