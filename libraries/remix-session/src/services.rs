//! Remote collaborators used by a session

use remix_core::{CatalogService, HistoryService, LikesService};
use std::sync::Arc;

/// Handles to the catalog, likes, and history services
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogService>,
    pub likes: Arc<dyn LikesService>,
    pub history: Arc<dyn HistoryService>,
}

impl Services {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        likes: Arc<dyn LikesService>,
        history: Arc<dyn HistoryService>,
    ) -> Self {
        Self {
            catalog,
            likes,
            history,
        }
    }

    /// Use one backend for all three services
    ///
    /// ```ignore
    /// let client = Arc::new(RemixServerClient::new(ClientConfig::load()?)?);
    /// let services = Services::from_backend(client);
    /// ```
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CatalogService + LikesService + HistoryService + 'static,
    {
        Self {
            catalog: backend.clone(),
            likes: backend.clone(),
            history: backend,
        }
    }
}
