use std::path::{Path, PathBuf};
use std::sync::Arc;

use finclass_core::{Classifier, LabelEncoder, Scaler};
use tracing::{info, warn};

use crate::{ArtifactError, ClassEncoder, DenseNetwork, FittedScaler};

pub const DEFAULT_MODEL_FILE: &str = "model.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_ENCODER_FILE: &str = "label_encoder.json";

/// Locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub encoder: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::with_names(dir, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE, DEFAULT_ENCODER_FILE)
    }

    pub fn with_names(dir: impl AsRef<Path>, model: &str, scaler: &str, encoder: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(model),
            scaler: dir.join(scaler),
            encoder: dir.join(encoder),
        }
    }
}

/// Read-only artifact handles shared by every request for the process lifetime.
#[derive(Clone)]
pub struct ArtifactStore {
    pub scaler: Arc<dyn Scaler>,
    pub classifier: Arc<dyn Classifier>,
    pub encoder: Arc<dyn LabelEncoder>,
}

impl ArtifactStore {
    /// Wraps already-constructed artifacts.
    pub fn from_parts(
        scaler: Arc<dyn Scaler>,
        classifier: Arc<dyn Classifier>,
        encoder: Arc<dyn LabelEncoder>,
    ) -> Self {
        Self { scaler, classifier, encoder }
    }

    /// Loads and cross-checks all three artifacts.
    ///
    /// `feature_count` is the schema length; scaler and model input widths
    /// must both equal it.
    pub fn load(paths: &ArtifactPaths, feature_count: usize) -> Result<Self, ArtifactError> {
        let scaler = FittedScaler::from_file(&paths.scaler)?;
        info!("Loaded {} scaler from {}", scaler.kind(), paths.scaler.display());

        let network = DenseNetwork::from_file(&paths.model)?;
        info!(
            "Loaded classifier from {} ({} layers, {} outputs)",
            paths.model.display(),
            network.layer_count(),
            network.output_width()
        );

        let encoder = ClassEncoder::from_file(&paths.encoder)?;
        info!(
            "Loaded label encoder from {} ({} classes)",
            paths.encoder.display(),
            encoder.classes().len()
        );

        if scaler.width() != feature_count {
            return Err(ArtifactError::Mismatch(format!(
                "scaler expects {} features, schema has {}",
                scaler.width(),
                feature_count
            )));
        }
        if network.input_width() != feature_count {
            return Err(ArtifactError::Mismatch(format!(
                "classifier expects {} features, schema has {}",
                network.input_width(),
                feature_count
            )));
        }

        if let Some(skew) = class_skew(network.output_width(), encoder.classes().len()) {
            warn!("{}", skew);
        }

        Ok(Self::from_parts(Arc::new(scaler), Arc::new(network), Arc::new(encoder)))
    }
}

/// Describes a classifier/encoder class-count disagreement, if any.
///
/// Fewer outputs than classes fails every prediction; more outputs than
/// classes yields placeholder labels for the extra indices.
fn class_skew(outputs: usize, classes: usize) -> Option<String> {
    if outputs < classes {
        Some(format!(
            "Classifier has {outputs} outputs but label encoder has {classes} classes; \
             every prediction will fail"
        ))
    } else if outputs > classes {
        Some(format!(
            "Classifier has {outputs} outputs but label encoder has {classes} classes; \
             indices {classes} and above will be labelled Unknown_Class_Index_<i>"
        ))
    } else {
        None
    }
}
