//! Pre-trained artifacts for finclass: JSON formats, loading and the
//! process-wide [`ArtifactStore`].
//!
//! Three files make up an artifact set:
//!
//! - a fitted scaler ([`FittedScaler`])
//! - a dense classifier network ([`DenseNetwork`])
//! - a label encoder ([`ClassEncoder`])
//!
//! They are loaded once at startup. Any missing, corrupt or mutually
//! inconsistent file is an [`ArtifactError`] and the process must not serve.

mod encoder;
mod network;
mod scaler;
mod store;

pub use encoder::ClassEncoder;
pub use network::{Activation, DenseLayer, DenseNetwork};
pub use scaler::FittedScaler;
pub use store::{ArtifactPaths, ArtifactStore};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Startup failures while reading artifacts.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("Artifact set is inconsistent: {0}")]
    Mismatch(String),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
