use std::sync::Arc;

use service::catalog::{CatalogService, FranchiseStore};

/// Shared handler state. Cloned per request; holds only the service handle.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService<dyn FranchiseStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn FranchiseStore>) -> Self {
        Self { catalog: CatalogService::new(store) }
    }
}
