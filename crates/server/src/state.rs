use std::sync::Arc;

use service::catalog::PlaceCatalog;

/// Shared handler state. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<dyn PlaceCatalog>,
}

impl ServerState {
    pub fn new(catalog: Arc<dyn PlaceCatalog>) -> Self {
        Self { catalog }
    }
}
