use finclass_artifacts::ArtifactStore;
use finclass_core::FeatureSchema;
use finclass_engine::InferenceEngine;

/// Process-wide state, immutable after startup.
pub struct ServerState {
    pub engine: InferenceEngine,
    pub schema: FeatureSchema,
}

impl ServerState {
    pub fn new(store: ArtifactStore, schema: FeatureSchema) -> Self {
        let engine = InferenceEngine::new(store.scaler, store.classifier, store.encoder);
        Self { engine, schema }
    }
}
