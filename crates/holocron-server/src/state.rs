use std::sync::Arc;

use holocron_db_memory::create_film_store;
use holocron_storage::DynFilmStore;
use holocron_swapi::{DynExternalSource, SourceError, SwapiClient};
use holocron_sync::{CatalogService, SyncService};

use crate::config::AppConfig;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub sync: Arc<SyncService>,
    pub catalog: CatalogService,
    pub store: DynFilmStore,
}

impl AppState {
    pub fn new(store: DynFilmStore, source: DynExternalSource) -> Self {
        Self {
            sync: Arc::new(SyncService::new(store.clone(), source)),
            catalog: CatalogService::new(store.clone()),
            store,
        }
    }

    /// Wires the configured store backend to the SWAPI client.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, SourceError> {
        let store = create_film_store(&cfg.storage);
        let source: DynExternalSource = Arc::new(SwapiClient::new(cfg.swapi.client_config())?);
        tracing::info!(
            store = store.backend_name(),
            source = source.source_name(),
            upstream = %cfg.swapi.base_url,
            "Application state initialized"
        );
        Ok(Self::new(store, source))
    }
}
