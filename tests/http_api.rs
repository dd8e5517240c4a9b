use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bikeval::application::ml::PriceModel;
use bikeval::application::valuation_service::{ValuationArtifacts, ValuationService};
use bikeval::domain::errors::PredictionError;
use bikeval::domain::valuation::{CategoryEncoder, EncodingTable, FeatureScaler, ScalerParams};
use bikeval::infrastructure::FixedYear;
use bikeval::interfaces::create_router;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

/// Prices a bike at 1000 per cc of capacity (last feature, unscaled).
struct PerCcModel;

impl PriceModel for PerCcModel {
    fn predict(&self, scaled: &[f64]) -> Result<f64, PredictionError> {
        Ok(scaled[6] * 1000.0 + 0.456)
    }

    fn name(&self) -> &str {
        "per-cc"
    }

    fn version(&self) -> &str {
        "test"
    }
}

fn create_test_app() -> Router {
    let mut brands = HashMap::new();
    brands.insert("KTM".to_string(), 4);
    let table = EncodingTable::new(HashMap::from([("Brand".to_string(), brands)]));
    let scaler = FeatureScaler::new(ScalerParams {
        mean: vec![0.0; 7],
        scale: vec![1.0; 7],
    })
    .unwrap();

    let service = ValuationService::new(
        ValuationArtifacts {
            encoder: CategoryEncoder::new(table),
            scaler,
            model: Arc::new(PerCcModel),
        },
        Arc::new(FixedYear(2025)),
    );
    create_router(Arc::new(service), true)
}

async fn post_predict(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn duke_790() -> Value {
    json!({
        "Bike Type": "Motorbikes",
        "Brand": "KTM",
        "Edition": "Standard",
        "Model": "Duke 790",
        "Year": 2023,
        "Mileage": 26955,
        "Capacity": 799
    })
}

#[tokio::test]
async fn test_index_returns_banner() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Bike Price Prediction API is Live!");
}

#[tokio::test]
async fn test_health_reports_model_and_features() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"], "per-cc");
    assert_eq!(json["features"].as_array().unwrap().len(), 7);
    assert_eq!(json["features"][6], "capacity");
}

#[tokio::test]
async fn test_predict_success() {
    let (status, json) = post_predict(create_test_app(), duke_790().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"predicted_price": 799000.46}));
}

#[tokio::test]
async fn test_predict_missing_fields_is_400() {
    let (status, json) = post_predict(
        create_test_app(),
        json!({"Brand": "KTM", "Year": 2020}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({"error": "Missing fields: Bike Type, Edition, Model, Mileage, Capacity"})
    );
}

#[tokio::test]
async fn test_predict_domain_error_is_500() {
    let mut body = duke_790();
    body["Mileage"] = json!(-3);
    let (status, json) = post_predict(create_test_app(), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("mileage"));
}

#[tokio::test]
async fn test_predict_malformed_json_keeps_error_shape() {
    let (status, json) = post_predict(create_test_app(), "{\"Brand\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_predict_non_object_body_is_400() {
    let (status, json) = post_predict(create_test_app(), "[1, 2, 3]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({"error": "Request body must be a JSON object, got an array"})
    );
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/predict")
                .header("origin", "http://localhost:8501")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
