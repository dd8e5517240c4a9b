use super::predictor::PriceModel;
use crate::domain::errors::{ArtifactError, PredictionError};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest regressor serialized with serde_json.
pub struct SmartCorePriceModel {
    model: ForestRegressor,
}

impl SmartCorePriceModel {
    pub fn new(model: ForestRegressor) -> Self {
        Self { model }
    }

    pub fn load(model_path: &Path) -> Result<Self, ArtifactError> {
        if !model_path.exists() {
            return Err(ArtifactError::NotFound {
                path: model_path.to_path_buf(),
            });
        }

        let file = File::open(model_path).map_err(|source| ArtifactError::Io {
            path: model_path.to_path_buf(),
            source,
        })?;

        let model: ForestRegressor = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ArtifactError::Malformed {
                path: model_path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        info!("Successfully loaded SmartCore model from {:?}", model_path);
        Ok(Self { model })
    }
}

impl PriceModel for SmartCorePriceModel {
    fn predict(&self, scaled: &[f64]) -> Result<f64, PredictionError> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![scaled.to_vec()])
            .map_err(|e| PredictionError::inference(format!("Matrix creation failed: {}", e)))?;

        let predictions = self
            .model
            .predict(&input_matrix)
            .map_err(|e| PredictionError::inference(format!("Prediction failed: {}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::inference("No prediction returned"))
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcore::ensemble::random_forest_regressor::RandomForestRegressorParameters;

    fn toy_forest() -> ForestRegressor {
        // Price grows with the last column only.
        let x: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let c = i as f64 / 10.0;
                vec![0.0, 1.0, 0.0, 1.0, 0.5, 0.5, c]
            })
            .collect();
        let y: Vec<f64> = (0..40).map(|i| 1000.0 + 100.0 * i as f64).collect();
        let x = DenseMatrix::from_2d_vec(&x).unwrap();
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(8)
            .with_max_depth(6)
            .with_min_samples_split(2);
        RandomForestRegressor::fit(&x, &y, params).unwrap()
    }

    #[test]
    fn test_predict_returns_scalar_within_target_range() {
        let model = SmartCorePriceModel::new(toy_forest());
        let price = model
            .predict(&[0.0, 1.0, 0.0, 1.0, 0.5, 0.5, 2.0])
            .unwrap();
        assert!((1000.0..=4900.0).contains(&price));
    }

    #[test]
    fn test_load_round_trips_serialized_forest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forest.json");
        let forest = toy_forest();
        serde_json::to_writer(File::create(&path).unwrap(), &forest).unwrap();

        let loaded = SmartCorePriceModel::load(&path).unwrap();
        let direct = SmartCorePriceModel::new(forest);
        let input = [0.0, 1.0, 0.0, 1.0, 0.5, 0.5, 3.3];
        assert_eq!(
            loaded.predict(&input).unwrap(),
            direct.predict(&input).unwrap()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = SmartCorePriceModel::load(Path::new("non_existent_model.json"));
        assert!(matches!(result, Err(ArtifactError::NotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forest.json");
        std::fs::write(&path, "{\"not\": \"a forest\"}").unwrap();
        let result = SmartCorePriceModel::load(&path);
        assert!(matches!(result, Err(ArtifactError::Malformed { .. })));
    }
}
