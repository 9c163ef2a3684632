use std::path::Path;

use finclass_core::{InferenceError, Scaler};
use serde::Deserialize;

use crate::{invalid, read_json, ArtifactError};

/// A fitted feature scaler.
///
/// `standard` computes `(x - mean) / scale`; `min_max` computes
/// `x * scale + min`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedScaler {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FittedScaler {
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let scaler: Self = read_json(path)?;
        scaler.check().map_err(|reason| invalid(path, reason))?;
        Ok(scaler)
    }

    /// Number of features the scaler was fitted on.
    pub fn width(&self) -> usize {
        match self {
            FittedScaler::Standard { mean, .. } => mean.len(),
            FittedScaler::MinMax { min, .. } => min.len(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FittedScaler::Standard { .. } => "standard",
            FittedScaler::MinMax { .. } => "min_max",
        }
    }

    pub fn check(&self) -> Result<(), String> {
        let (offset, scale) = match self {
            FittedScaler::Standard { mean, scale } => (mean, scale),
            FittedScaler::MinMax { min, scale } => (min, scale),
        };

        if offset.is_empty() {
            return Err("scaler has no features".into());
        }
        if offset.len() != scale.len() {
            return Err(format!(
                "parameter lengths differ: {} offsets, {} scales",
                offset.len(),
                scale.len()
            ));
        }
        if offset.iter().chain(scale).any(|v| !v.is_finite()) {
            return Err("non-finite scaler parameter".into());
        }
        if matches!(self, FittedScaler::Standard { .. }) && scale.iter().any(|s| *s == 0.0) {
            return Err("zero scale in standard scaler".into());
        }

        Ok(())
    }
}

impl Scaler for FittedScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.width() {
            return Err(InferenceError::ShapeMismatch {
                stage: "scaler input",
                expected: self.width(),
                actual: features.len(),
            });
        }

        let scaled: Vec<f64> = match self {
            FittedScaler::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            FittedScaler::MinMax { min, scale } => features
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        };

        if let Some(i) = scaled.iter().position(|v| !v.is_finite()) {
            return Err(InferenceError::Scaler(format!("non-finite value at feature {i}")));
        }

        Ok(scaled)
    }
}
