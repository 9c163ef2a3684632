//! Environment-driven server configuration.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use finclass_artifacts::ArtifactPaths;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub artifacts: ArtifactPaths,
}

impl ServerConfig {
    /// Reads `FINCLASS_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = lookup("FINCLASS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { value, source })?;

        let dir = PathBuf::from(
            lookup("FINCLASS_ARTIFACT_DIR").unwrap_or_else(|| DEFAULT_ARTIFACT_DIR.into()),
        );
        let defaults = ArtifactPaths::in_dir(&dir);

        let artifacts = ArtifactPaths {
            model: lookup("FINCLASS_MODEL_FILE").map_or(defaults.model, |f| dir.join(f)),
            scaler: lookup("FINCLASS_SCALER_FILE").map_or(defaults.scaler, |f| dir.join(f)),
            encoder: lookup("FINCLASS_ENCODER_FILE").map_or(defaults.encoder, |f| dir.join(f)),
        };

        Ok(Self { bind_addr, artifacts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.artifacts, ArtifactPaths::in_dir("artifacts"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FINCLASS_BIND_ADDR", "127.0.0.1:9000"),
            ("FINCLASS_ARTIFACT_DIR", "/srv/finclass"),
            ("FINCLASS_MODEL_FILE", "best_model.json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.artifacts.model, PathBuf::from("/srv/finclass/best_model.json"));
        assert_eq!(config.artifacts.scaler, PathBuf::from("/srv/finclass/scaler.json"));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = config_from(&[("FINCLASS_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }
}
