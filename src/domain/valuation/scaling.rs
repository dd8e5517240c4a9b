use crate::domain::errors::{ArtifactError, PredictionError};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Per-feature center and scale as fitted by a standard scaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    #[serde(alias = "center", alias = "mean_")]
    pub mean: Vec<f64>,
    #[serde(alias = "scale_")]
    pub scale: Vec<f64>,
}

/// Applies `(x - mean) / scale` element-wise.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl FeatureScaler {
    pub fn new(params: ScalerParams) -> Result<Self, ArtifactError> {
        let invalid = |reason: String| ArtifactError::InvalidScaler { reason };

        if params.mean.len() != params.scale.len() {
            return Err(invalid(format!(
                "mean has {} entries but scale has {}",
                params.mean.len(),
                params.scale.len()
            )));
        }
        if params.mean.is_empty() {
            return Err(invalid("no features".to_string()));
        }
        if let Some(idx) = params.mean.iter().position(|m| !m.is_finite()) {
            return Err(invalid(format!("mean[{}] is not finite", idx)));
        }
        if let Some(idx) = params
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(invalid(format!(
                "scale[{}] = {} cannot be used as a divisor",
                idx, params.scale[idx]
            )));
        }

        Ok(Self {
            mean: Array1::from(params.mean),
            scale: Array1::from(params.scale),
        })
    }

    /// Number of features the scaler was fitted on.
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    pub fn scale(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError> {
        self.check_dimension(features)?;
        let x = ArrayView1::from(features);
        let scaled = (&x - &self.mean) / &self.scale;
        Ok(scaled.to_vec())
    }

    /// Inverse of [`FeatureScaler::scale`].
    pub fn unscale(&self, scaled: &[f64]) -> Result<Vec<f64>, PredictionError> {
        self.check_dimension(scaled)?;
        let z = ArrayView1::from(scaled);
        let restored = &z * &self.scale + &self.mean;
        Ok(restored.to_vec())
    }

    fn check_dimension(&self, values: &[f64]) -> Result<(), PredictionError> {
        if values.len() != self.dimension() {
            return Err(PredictionError::DimensionMismatch {
                expected: self.dimension(),
                actual: values.len(),
            });
        }
        Ok(())
    }
}
