use crate::application::valuation_service::ValuationArtifacts;
use crate::config::ArtifactEnvConfig;
use crate::domain::errors::ArtifactError;
use crate::domain::valuation::{
    CategoryEncoder, EncodingTable, FEATURE_COUNT, FeatureScaler, ScalerParams,
};
use crate::infrastructure::factory::ModelFactory;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| ArtifactError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn load_encoding_table(path: &Path) -> Result<EncodingTable, ArtifactError> {
    let table: EncodingTable = read_json(path)?;
    if table.is_empty() {
        warn!(
            "Encoding table {:?} is empty; every category will encode as 0",
            path
        );
    }
    for field in table.field_names() {
        info!("Encoder field '{}': {} categories", field, table.categories(field));
    }
    Ok(table)
}

/// Loads scaler parameters and checks they cover the full feature vector.
pub fn load_scaler(path: &Path) -> Result<FeatureScaler, ArtifactError> {
    let params: ScalerParams = read_json(path)?;
    let scaler = FeatureScaler::new(params)?;
    if scaler.dimension() != FEATURE_COUNT {
        return Err(ArtifactError::InvalidScaler {
            reason: format!(
                "fitted on {} features, the pipeline produces {}",
                scaler.dimension(),
                FEATURE_COUNT
            ),
        });
    }
    info!("Loaded scaler from {:?} ({} features)", path, scaler.dimension());
    Ok(scaler)
}

/// Loads encoder, scaler and model. Any failure here must abort startup.
pub fn load_artifacts(config: &ArtifactEnvConfig) -> Result<ValuationArtifacts> {
    let table = load_encoding_table(&config.label_encoders_path)
        .context("Failed to load label encoders")?;
    let scaler = load_scaler(&config.scaler_path).context("Failed to load scaler")?;
    let model = ModelFactory::create(config.resolved_backend(), &config.model_path)
        .context("Failed to load model")?;

    info!("Model ready: {} ({})", model.name(), model.version());

    Ok(ValuationArtifacts {
        encoder: CategoryEncoder::new(table),
        scaler,
        model,
    })
}
