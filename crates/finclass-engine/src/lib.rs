//! Inference dispatch: scale, classify, decode.
//!
//! [`predict`] is the whole pipeline as a free function over the artifact
//! traits. [`InferenceEngine`] holds the injected artifact handles so the
//! HTTP layer can share one instance across requests.

use std::sync::Arc;

use finclass_core::{
    Classifier, FeatureVector, InferenceError, LabelEncoder, PredictionResult, Probabilities,
    Scaler,
};
use tracing::warn;

/// Runs one validated vector through the artifacts.
///
/// Scaling and model failures are returned as [`InferenceError`]. A class
/// index the encoder cannot decode is not an error: the label degrades to
/// `Unknown_Class_Index_<i>` and the cause is logged.
pub fn predict(
    vector: &FeatureVector,
    scaler: &dyn Scaler,
    model: &dyn Classifier,
    encoder: &dyn LabelEncoder,
) -> Result<PredictionResult, InferenceError> {
    let scaled = scaler.transform(vector.as_slice())?;
    if scaled.len() != vector.len() {
        return Err(InferenceError::ShapeMismatch {
            stage: "scaler output",
            expected: vector.len(),
            actual: scaled.len(),
        });
    }

    let probs = model.predict_proba(&scaled)?;
    let classes = encoder.classes();
    if probs.len() < classes.len() {
        return Err(InferenceError::ShapeMismatch {
            stage: "model output",
            expected: classes.len(),
            actual: probs.len(),
        });
    }

    let index = argmax(&probs)
        .ok_or_else(|| InferenceError::Model("empty probability vector".into()))?;

    let predicted_label = encoder.decode(index).unwrap_or_else(|e| {
        warn!("Label decode degraded for class index {}: {}", index, e);
        unknown_label(index)
    });

    let probabilities = Probabilities::new(
        classes
            .iter()
            .cloned()
            .zip(probs.iter().copied())
            .collect(),
    );

    Ok(PredictionResult { predicted_label, probabilities })
}

/// Placeholder label for an index the encoder cannot map.
pub fn unknown_label(index: usize) -> String {
    format!("Unknown_Class_Index_{index}")
}

/// Index of the largest value; ties go to the first occurrence.
fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Shared, read-only inference handles.
#[derive(Clone)]
pub struct InferenceEngine {
    scaler: Arc<dyn Scaler>,
    model: Arc<dyn Classifier>,
    encoder: Arc<dyn LabelEncoder>,
}

impl InferenceEngine {
    pub fn new(
        scaler: Arc<dyn Scaler>,
        model: Arc<dyn Classifier>,
        encoder: Arc<dyn LabelEncoder>,
    ) -> Self {
        Self { scaler, model, encoder }
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, InferenceError> {
        predict(vector, self.scaler.as_ref(), self.model.as_ref(), self.encoder.as_ref())
    }

    /// Known labels in encoder order.
    pub fn classes(&self) -> &[String] {
        self.encoder.classes()
    }
}
