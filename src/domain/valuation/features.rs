use super::encoding::{CategoryEncoder, UNKNOWN_CODE};
use super::request::{BikeRequest, CAPACITY, CATEGORICAL_FIELDS, MILEAGE, YEAR};
use crate::domain::errors::PredictionError;
use tracing::debug;

/// Ordered list of feature names.
/// This order MUST match the column order the scaler and model were fitted on.
/// Any change here is a breaking change for the model artifacts.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "bike_type_code",
    "brand_code",
    "edition_code",
    "model_code",
    "log_age",
    "log_mileage",
    "capacity",
];

pub const FEATURE_COUNT: usize = 7;

/// Model input for a single listing, in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// `ln(1 + x)`, rejecting inputs where the logarithm is undefined.
pub fn log1p_feature(feature: &str, input: f64) -> Result<f64, PredictionError> {
    if input <= -1.0 {
        return Err(PredictionError::OutOfDomain {
            feature: feature.to_string(),
            input,
        });
    }
    Ok(input.ln_1p())
}

/// Years between registration and `current_year`, log-transformed.
/// Future years are passed through as long as the gap stays above -1.
pub fn age_feature(year: i64, current_year: i32) -> Result<f64, PredictionError> {
    let age_gap = i64::from(current_year).checked_sub(year).ok_or_else(|| {
        PredictionError::InvalidNumber {
            field: YEAR.to_string(),
            reason: format!("{} is too far from {} to compute an age", year, current_year),
        }
    })?;
    log1p_feature("age", age_gap as f64)
}

pub fn mileage_feature(mileage: f64) -> Result<f64, PredictionError> {
    log1p_feature("mileage", mileage)
}

/// Assembles the feature vector for `request`.
///
/// Numeric fields are validated here even if the caller already checked
/// presence: an absent or non-numeric value is an `InvalidNumber` error.
pub fn build_features(
    request: &BikeRequest,
    encoder: &CategoryEncoder,
    current_year: i32,
) -> Result<FeatureVector, PredictionError> {
    let mut codes = [0.0; 4];
    for (slot, field) in codes.iter_mut().zip(CATEGORICAL_FIELDS) {
        let raw = request.category(field).unwrap_or_default();
        let encoded = encoder.lookup(field, &raw);
        if !encoded.is_known() {
            debug!("Unknown {} {:?}, encoding as {}", field, raw, UNKNOWN_CODE);
        }
        *slot = encoded.code() as f64;
    }

    let age = age_feature(request.integer(YEAR)?, current_year)?;
    let mileage = mileage_feature(request.number(MILEAGE)?)?;
    let capacity = request.number(CAPACITY)?;

    Ok(FeatureVector([
        codes[0], codes[1], codes[2], codes[3], age, mileage, capacity,
    ]))
}
