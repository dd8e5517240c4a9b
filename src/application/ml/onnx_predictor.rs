use super::predictor::PriceModel;
use crate::domain::errors::{ArtifactError, PredictionError};
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Regressor exported to ONNX (e.g. a scikit-learn ensemble via skl2onnx).
///
/// Expects a single `[1, n]` float32 input and reads the first element of
/// the first output.
pub struct OnnxPriceModel {
    session: Mutex<Session>,
}

impl OnnxPriceModel {
    pub fn load(model_path: &Path) -> Result<Self, ArtifactError> {
        if !model_path.exists() {
            return Err(ArtifactError::NotFound {
                path: model_path.to_path_buf(),
            });
        }

        let backend_error = |reason: String| ArtifactError::Backend {
            backend: "onnx".to_string(),
            reason,
        };

        let session = Session::builder()
            .map_err(|e| backend_error(format!("Failed to create ONNX session builder: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ArtifactError::Malformed {
                path: model_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        info!("Successfully loaded ONNX model from {:?}", model_path);
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl PriceModel for OnnxPriceModel {
    fn predict(&self, scaled: &[f64]) -> Result<f64, PredictionError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictionError::inference(format!("Mutex lock failed: {}", e)))?;

        let data: Vec<f32> = scaled.iter().map(|v| *v as f32).collect();
        let shape = vec![1, data.len()];

        let input_value = ort::value::Value::from_array((shape.as_slice(), data))
            .map_err(|e| {
                PredictionError::inference(format!("Input value creation failed: {}", e))
            })?;

        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| PredictionError::inference(e.to_string()))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or_else(|| PredictionError::inference("No output found"))?;
        let tensor = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictionError::inference(e.to_string()))?;

        tensor
            .1
            .iter()
            .next()
            .map(|v| *v as f64)
            .ok_or_else(|| PredictionError::inference("Empty output"))
    }

    fn name(&self) -> &str {
        "ONNX Runtime Regressor"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}
