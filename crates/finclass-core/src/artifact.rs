//! Capability traits implemented by the pre-trained artifacts.
//!
//! The server only ever sees these traits, so concrete artifact formats and
//! test doubles are interchangeable.

use crate::error::{DecodeError, InferenceError};

/// A pre-fitted, deterministic feature transform.
pub trait Scaler: Send + Sync {
    /// Returns a vector of the same length and order as `features`.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// A trained classifier producing one probability per class.
pub trait Classifier: Send + Sync {
    /// Evaluates a single scaled row.
    fn predict_proba(&self, scaled: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// Fixed bidirectional mapping between class indices and labels.
pub trait LabelEncoder: Send + Sync {
    /// Known labels in the encoder's own fixed order.
    fn classes(&self) -> &[String];

    /// Maps a class index to its label.
    fn decode(&self, index: usize) -> Result<String, DecodeError> {
        let classes = self.classes();
        classes
            .get(index)
            .cloned()
            .ok_or(DecodeError::OutOfRange { index, len: classes.len() })
    }
}
