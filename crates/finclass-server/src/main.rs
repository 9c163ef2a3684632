use std::sync::Arc;

use anyhow::{Context, Result};
use finclass_artifacts::ArtifactStore;
use finclass_core::FeatureSchema;
use finclass_server::{app, ServerConfig, ServerState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    let schema = FeatureSchema::financial();

    let store = ArtifactStore::load(&config.artifacts, schema.len())
        .context("failed to load model artifacts")?;
    let state = Arc::new(ServerState::new(store, schema));

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
