//! HTTP surface for the valuation service.
//!
//! - `GET /`         liveness banner
//! - `GET /health`   model identity and feature order
//! - `POST /predict` price estimate for one listing

use crate::application::valuation_service::{PredictionResponse, ValuationService};
use crate::domain::errors::ErrorKind;
use crate::domain::valuation::FEATURE_NAMES;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const LIVENESS_BANNER: &str = "Bike Price Prediction API is Live!";

#[derive(Clone)]
pub struct AppState {
    service: Arc<ValuationService>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model: String,
    version: String,
    features: Vec<&'static str>,
}

pub fn create_router(service: Arc<ValuationService>, cors_enabled: bool) -> Router {
    let router = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(AppState { service })
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn index() -> &'static str {
    LIVENESS_BANNER
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = state.service.model();
    Json(HealthResponse {
        status: "ok",
        model: model.name().to_string(),
        version: model.version().to_string(),
        features: FEATURE_NAMES.to_vec(),
    })
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<PredictionResponse>) {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            info!("Rejected unreadable prediction body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(PredictionResponse::Failure {
                    error: rejection.body_text(),
                    kind: ErrorKind::Validation,
                }),
            );
        }
    };

    let response = state.service.handle(body);
    (status_for(&response), Json(response))
}

/// 400 for caller-side validation failures, 500 for everything else that fails.
pub fn status_for(response: &PredictionResponse) -> StatusCode {
    match response.error_kind() {
        None => StatusCode::OK,
        Some(ErrorKind::Validation) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::Domain) | Some(ErrorKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
