//! Configuration module for the valuation service.
//!
//! Structured configuration loading from environment variables, split into
//! the HTTP server settings and the locations of the fitted artifacts.

mod artifact_config;
mod server_config;

pub use artifact_config::ArtifactEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;

/// Serialization format of the regression model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    SmartCore,
    Onnx,
}

impl ModelBackend {
    pub fn infer_from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("onnx") => ModelBackend::Onnx,
            _ => ModelBackend::SmartCore,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelBackend::SmartCore => "smartcore",
            ModelBackend::Onnx => "onnx",
        }
    }
}

impl FromStr for ModelBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "smartcore" => Ok(ModelBackend::SmartCore),
            "onnx" => Ok(ModelBackend::Onnx),
            _ => anyhow::bail!(
                "Invalid MODEL_BACKEND: {}. Must be 'smartcore' or 'onnx'",
                s
            ),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub artifacts: ArtifactEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env();
        let artifacts = ArtifactEnvConfig::from_env().context("Failed to load artifact config")?;
        Ok(Self { server, artifacts })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}
