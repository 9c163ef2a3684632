//! Prediction handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use finclass_core::validate;
use serde_json::Value;
use tracing::{info, warn};

use crate::dto::PredictResponse;
use crate::error::AppError;
use crate::ServerState;

/// POST /predict - classify one set of financial features.
///
/// Validation runs to completion before any artifact is touched.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(raw) = payload.map_err(|e| {
        warn!("Rejected request body: {}", e.body_text());
        AppError::BadRequest(format!("Invalid request body: {}", e.body_text()))
    })?;

    let vector = validate(&raw, &state.schema).map_err(|e| {
        warn!("Validation failed: {}", e);
        e
    })?;

    let result = state.engine.predict(&vector)?;

    info!("Predicted {}", result.predicted_label);
    Ok(Json(PredictResponse::from(result)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use finclass_artifacts::{ArtifactStore, ClassEncoder};
    use finclass_core::{Classifier, FeatureSchema, InferenceError, Scaler};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{app, ServerState};

    use super::*;

    #[derive(Default)]
    struct SpyScaler {
        calls: AtomicUsize,
        seen: Mutex<Vec<f64>>,
    }

    impl Scaler for SpyScaler {
        fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = features.to_vec();
            Ok(features.iter().map(|v| v / 1_000_000.0).collect())
        }
    }

    struct SpyModel {
        calls: AtomicUsize,
        output: Result<Vec<f64>, InferenceError>,
    }

    impl SpyModel {
        fn returning(probs: Vec<f64>) -> Self {
            Self { calls: AtomicUsize::new(0), output: Ok(probs) }
        }

        fn failing(e: InferenceError) -> Self {
            Self { calls: AtomicUsize::new(0), output: Err(e) }
        }
    }

    impl Classifier for SpyModel {
        fn predict_proba(&self, _scaled: &[f64]) -> Result<Vec<f64>, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.output.clone()
        }
    }

    struct Harness {
        scaler: Arc<SpyScaler>,
        model: Arc<SpyModel>,
        state: Arc<ServerState>,
    }

    fn harness(model: SpyModel) -> Harness {
        let scaler = Arc::new(SpyScaler::default());
        let model = Arc::new(model);
        let encoder =
            ClassEncoder::new(vec!["Boros".into(), "Hemat".into(), "Seimbang".into()]).unwrap();
        let store = ArtifactStore::from_parts(scaler.clone(), model.clone(), Arc::new(encoder));

        Harness {
            scaler,
            model,
            state: Arc::new(ServerState::new(store, FeatureSchema::financial())),
        }
    }

    fn full_request() -> Value {
        json!({
            "Gaji": 5000000,
            "Tabungan Lama": 10000000,
            "Investasi": 2000000,
            "Pemasukan Lainnya": 1000000,
            "Bahan Pokok": 1500000,
            "Protein & Gizi Tambahan": 500000,
            "Tempat Tinggal": 2000000,
            "Sandang": 300000,
            "Konsumsi Praktis": 800000,
            "Barang & Jasa Sekunder": 400000,
            "Pengeluaran Tidak Esensial": 200000,
            "Pajak": 250000,
            "Asuransi": 300000,
            "Sosial & Budaya": 150000,
            "Tabungan / Investasi": 500000
        })
    }

    async fn post(state: Arc<ServerState>, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(state: Arc<ServerState>, body: &Value) -> (StatusCode, Value) {
        post(state, Body::from(body.to_string())).await
    }

    #[tokio::test]
    async fn test_end_to_end_prediction() {
        let h = harness(SpyModel::returning(vec![0.15, 0.6, 0.25]));

        let (status, body) = post_json(h.state.clone(), &full_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "prediction": "Hemat",
                "probabilities": { "Boros": 0.15, "Hemat": 0.6, "Seimbang": 0.25 }
            })
        );
        assert_eq!(
            *h.scaler.seen.lock().unwrap(),
            vec![
                5000000.0, 10000000.0, 2000000.0, 1000000.0, 1500000.0, 500000.0, 2000000.0,
                300000.0, 800000.0, 400000.0, 200000.0, 250000.0, 300000.0, 150000.0, 500000.0
            ]
        );
        assert_eq!(h.model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_skip_inference() {
        let h = harness(SpyModel::returning(vec![0.2, 0.3, 0.5]));
        let mut request = full_request();
        let fields = request.as_object_mut().unwrap();
        fields.remove("Pajak");
        fields.remove("Sandang");

        let (status, body) = post_json(h.state.clone(), &request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["missing_fields"], json!(["Sandang", "Pajak"]));
        assert_eq!(body["error"], "Missing required fields: Sandang, Pajak");
        assert_eq!(h.scaler.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_field_named() {
        let h = harness(SpyModel::returning(vec![0.2, 0.3, 0.5]));
        let mut request = full_request();
        request["Protein & Gizi Tambahan"] = json!("lima ratus ribu");

        let (status, body) = post_json(h.state.clone(), &request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "Protein & Gizi Tambahan");
        assert!(body.get("missing_fields").is_none());
        assert_eq!(h.scaler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_class_index_degrades_to_ok() {
        let h = harness(SpyModel::returning(vec![0.1, 0.1, 0.1, 0.7]));

        let (status, body) = post_json(h.state.clone(), &full_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], "Unknown_Class_Index_3");
        assert_eq!(body["probabilities"].as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_internal_error_is_generic() {
        let h = harness(SpyModel::failing(InferenceError::Model("tensor blew up".into())));

        let (status, body) = post_json(h.state.clone(), &full_request()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal server error" }));
    }

    #[tokio::test]
    async fn test_empty_body_rejected() {
        let h = harness(SpyModel::returning(vec![1.0, 0.0, 0.0]));

        let (status, body) = post(h.state.clone(), Body::empty()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
        assert_eq!(h.scaler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_number_literal_names_field() {
        let h = harness(SpyModel::returning(vec![0.2, 0.3, 0.5]));
        let raw = full_request()
            .to_string()
            .replace("\"Pajak\":250000", "\"Pajak\":1e400");
        assert!(raw.contains("1e400"));

        let (status, body) = post(h.state.clone(), Body::from(raw)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "Pajak");
        assert_eq!(body["error"], "Field 'Pajak' must be a finite number");
        assert_eq!(h.scaler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_object_body_rejected() {
        let h = harness(SpyModel::returning(vec![1.0, 0.0, 0.0]));

        let (status, body) = post_json(h.state.clone(), &json!([1, 2, 3])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Request body must be a JSON object");
    }

    #[tokio::test]
    async fn test_repeated_predictions_identical() {
        let h = harness(SpyModel::returning(vec![0.5, 0.5, 0.0]));

        let (_, first) = post_json(h.state.clone(), &full_request()).await;
        let (_, second) = post_json(h.state.clone(), &full_request()).await;

        assert_eq!(first, second);
        assert_eq!(first["prediction"], "Boros");
    }
}
