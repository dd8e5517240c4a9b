//! HTTP server configuration parsing from environment variables.

use std::env;

/// Server environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEnvConfig {
    pub bind_address: String,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
            cors_enabled: true,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_address: lookup("BIKEVAL_BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: lookup("BIKEVAL_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            cors_enabled: lookup("CORS_ENABLED")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(defaults.cors_enabled),
        }
    }
}
