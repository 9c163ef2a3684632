use finclass_core::{PredictionResult, Probabilities};
use serde::Serialize;

// === HTTP DTOs ===

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub probabilities: Probabilities,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            prediction: result.predicted_label,
            probabilities: result.probabilities,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub artifacts_loaded: bool,
    pub classes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing_fields: None,
            field: None,
        }
    }
}
