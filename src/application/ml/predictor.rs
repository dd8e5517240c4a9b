use crate::domain::errors::PredictionError;

/// Interface for price regression models
pub trait PriceModel: Send + Sync {
    /// Predict a price from an already scaled feature vector
    fn predict(&self, scaled: &[f64]) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
