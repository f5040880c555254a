//! Shared server state.

use std::sync::Arc;

use hive_protocol::GenerationBackend;
use hive_store::ProjectStore;

/// State threaded through every handler.
///
/// Both members arrive by constructor injection so tests swap in an
/// in-memory store and a scripted backend.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub store: Arc<ProjectStore>,
    /// The generative backend.
    pub backend: Arc<dyn GenerationBackend>,
}

impl AppState {
    /// Assemble server state.
    pub fn new(store: Arc<ProjectStore>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self { store, backend }
    }
}
