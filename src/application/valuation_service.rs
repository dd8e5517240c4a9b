//! Request handling for price predictions.
//!
//! Validates the incoming object, then runs encoder -> feature builder ->
//! scaler -> model in that order. Every failure is turned into a flat
//! `{error}` response; nothing here panics on bad input.

use crate::application::ml::PriceModel;
use crate::domain::errors::{ErrorKind, PredictionError};
use crate::domain::ports::YearSource;
use crate::domain::valuation::{BikeRequest, CategoryEncoder, FeatureScaler, build_features};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Everything loaded once at startup and shared read-only across requests.
pub struct ValuationArtifacts {
    pub encoder: CategoryEncoder,
    pub scaler: FeatureScaler,
    pub model: Arc<dyn PriceModel>,
}

/// Response body for a prediction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Price {
        predicted_price: f64,
    },
    Failure {
        error: String,
        #[serde(skip_serializing)]
        kind: ErrorKind,
    },
}

impl PredictionResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResponse::Price { .. })
    }

    /// `Some(kind)` for failures.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            PredictionResponse::Price { .. } => None,
            PredictionResponse::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<PredictionError> for PredictionResponse {
    fn from(err: PredictionError) -> Self {
        PredictionResponse::Failure {
            kind: err.kind(),
            error: err.to_string(),
        }
    }
}

pub struct ValuationService {
    encoder: CategoryEncoder,
    scaler: FeatureScaler,
    model: Arc<dyn PriceModel>,
    clock: Arc<dyn YearSource>,
}

impl ValuationService {
    pub fn new(artifacts: ValuationArtifacts, clock: Arc<dyn YearSource>) -> Self {
        Self {
            encoder: artifacts.encoder,
            scaler: artifacts.scaler,
            model: artifacts.model,
            clock,
        }
    }

    pub fn model(&self) -> &dyn PriceModel {
        self.model.as_ref()
    }

    /// Handles one raw request body and never fails: errors become
    /// `PredictionResponse::Failure`.
    pub fn handle(&self, raw: Value) -> PredictionResponse {
        match BikeRequest::from_value(raw).and_then(|request| self.predict(&request)) {
            Ok(predicted_price) => PredictionResponse::Price { predicted_price },
            Err(err) => {
                match err.kind() {
                    ErrorKind::Validation => info!("Rejected prediction request: {}", err),
                    ErrorKind::Domain => warn!("Unusable prediction input: {}", err),
                    ErrorKind::Internal => error!("Prediction pipeline failure: {}", err),
                }
                err.into()
            }
        }
    }

    /// Price for `request`, rounded to 2 decimals.
    pub fn predict(&self, request: &BikeRequest) -> Result<f64, PredictionError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(PredictionError::MissingFields { fields: missing });
        }

        let current_year = self.clock.current_year();
        let features = build_features(request, &self.encoder, current_year)?;
        debug!("Features: {:?}", features.as_slice());

        let scaled = self.scaler.scale(features.as_slice())?;
        let price = self.model.predict(&scaled)?;

        if !price.is_finite() {
            return Err(PredictionError::inference(format!(
                "{} returned a non-finite price",
                self.model.name()
            )));
        }
        Ok(round_price(price))
    }
}

/// Rounds half away from zero to 2 decimal places.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
