//! Catalog client handle.

use std::sync::Arc;

use storefront_catalog::CatalogClient;

/// Cloneable handle to the catalog client.
#[derive(Clone)]
pub struct CatalogState {
    client: Arc<dyn CatalogClient>,
}

impl CatalogState {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        CatalogState { client }
    }

    /// Wraps a concrete client.
    pub fn from_client<C: CatalogClient + 'static>(client: C) -> Self {
        CatalogState::new(Arc::new(client))
    }

    pub fn client(&self) -> &dyn CatalogClient {
        self.client.as_ref()
    }
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState").finish_non_exhaustive()
    }
}
