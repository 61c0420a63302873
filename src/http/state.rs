use std::sync::Arc;

use crate::pipeline::Pipeline;
use crate::storage::ArtifactStore;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Upload/analyze orchestration
    pub pipeline: Arc<Pipeline>,

    /// Direct store access for downloads, listing and health reporting
    pub store: Arc<ArtifactStore>,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, store: Arc<ArtifactStore>) -> Self {
        Self { pipeline, store }
    }
}
