//! Dense feed-forward classifier evaluated in pure Rust.

use std::path::Path;

use finclass_core::{Classifier, InferenceError};
use serde::Deserialize;

use crate::{invalid, read_json, ArtifactError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    fn apply(self, values: &mut [f64]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => values.iter_mut().for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Softmax => softmax(values),
        }
    }
}

fn softmax(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}

/// One fully connected layer. `weights` is indexed `[input][output]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    pub fn inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn outputs(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.bias.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            for (o, w) in out.iter_mut().zip(row) {
                *o += x * w;
            }
        }
        self.activation.apply(&mut out);
        out
    }
}

/// Classifier artifact: `{"layers": [...]}`, ending in a softmax layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, String> {
        let network = Self { layers };
        network.check()?;
        Ok(network)
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let network: Self = read_json(path)?;
        network.check().map_err(|reason| invalid(path, reason))?;
        Ok(network)
    }

    pub fn input_width(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::inputs)
    }

    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::outputs)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn check(&self) -> Result<(), String> {
        let Some(last) = self.layers.last() else {
            return Err("network has no layers".into());
        };
        if last.activation != Activation::Softmax {
            return Err("final layer must use softmax activation".into());
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.inputs() == 0 || layer.outputs() == 0 {
                return Err(format!("layer {i} is empty"));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != layer.outputs()) {
                return Err(format!(
                    "layer {i} weight row {row} has {} columns, expected {}",
                    layer.weights[row].len(),
                    layer.outputs()
                ));
            }
            if layer.bias.iter().chain(layer.weights.iter().flatten()).any(|v| !v.is_finite()) {
                return Err(format!("layer {i} has non-finite parameters"));
            }
        }

        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].outputs() != pair[1].inputs() {
                return Err(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    i,
                    pair[0].outputs(),
                    i + 1,
                    pair[1].inputs()
                ));
            }
        }

        Ok(())
    }
}

impl Classifier for DenseNetwork {
    fn predict_proba(&self, scaled: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if scaled.len() != self.input_width() {
            return Err(InferenceError::ShapeMismatch {
                stage: "model input",
                expected: self.input_width(),
                actual: scaled.len(),
            });
        }

        let probs = self
            .layers
            .iter()
            .fold(scaled.to_vec(), |activations, layer| layer.forward(&activations));

        if probs.iter().any(|p| !p.is_finite()) {
            return Err(InferenceError::Model("non-finite output probability".into()));
        }

        Ok(probs)
    }
}
