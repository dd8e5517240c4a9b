use crate::application::ml::{PriceModel, SmartCorePriceModel};
use crate::config::ModelBackend;
use crate::domain::errors::ArtifactError;
use std::path::Path;
use std::sync::Arc;

pub struct ModelFactory;

impl ModelFactory {
    pub fn create(
        backend: ModelBackend,
        model_path: &Path,
    ) -> Result<Arc<dyn PriceModel>, ArtifactError> {
        match backend {
            ModelBackend::SmartCore => Ok(Arc::new(SmartCorePriceModel::load(model_path)?)),
            #[cfg(feature = "onnx")]
            ModelBackend::Onnx => Ok(Arc::new(
                crate::application::ml::OnnxPriceModel::load(model_path)?,
            )),
            #[cfg(not(feature = "onnx"))]
            ModelBackend::Onnx => Err(ArtifactError::Backend {
                backend: backend.as_str().to_string(),
                reason: "built without the `onnx` feature".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_fails_for_every_backend() {
        for backend in [ModelBackend::SmartCore, ModelBackend::Onnx] {
            let result = ModelFactory::create(backend, Path::new("missing/model.bin"));
            assert!(result.is_err(), "{:?} should fail", backend);
        }
    }
}
