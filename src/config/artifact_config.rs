use super::ModelBackend;
use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Locations of the fitted artifacts loaded at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactEnvConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub label_encoders_path: PathBuf,
    pub model_backend: Option<ModelBackend>,
}

impl Default for ArtifactEnvConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/ensemble_model.json"),
            scaler_path: PathBuf::from("model/scaler.json"),
            label_encoders_path: PathBuf::from("model/label_encoders.json"),
            model_backend: None,
        }
    }
}

impl ArtifactEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let model_backend = lookup("MODEL_BACKEND")
            .filter(|v| !v.trim().is_empty())
            .map(|v| ModelBackend::from_str(&v))
            .transpose()?;

        Ok(Self {
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            scaler_path: lookup("SCALER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.scaler_path),
            label_encoders_path: lookup("LABEL_ENCODERS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.label_encoders_path),
            model_backend,
        })
    }

    /// Backend to load `model_path` with: the explicit override if set,
    /// otherwise inferred from the file extension.
    pub fn resolved_backend(&self) -> ModelBackend {
        self.model_backend
            .unwrap_or_else(|| ModelBackend::infer_from_path(&self.model_path))
    }
}
