//! Entry point the HTTP layer uses for sync operations.

use holocron_core::Film;
use holocron_storage::DynFilmStore;
use holocron_swapi::DynExternalSource;

use crate::error::SyncError;
use crate::executor::SyncExecutor;
use crate::force::FilmForcer;
use crate::reconciler::Reconciler;
use crate::status::{SyncOutcome, SyncRequest};

/// Entry point of the sync engine for the presentation layer.
pub struct SyncService {
    reconciler: Reconciler,
    executor: SyncExecutor,
    forcer: FilmForcer,
}

impl SyncService {
    pub fn new(store: DynFilmStore, source: DynExternalSource) -> Self {
        let reconciler = Reconciler::new(store, source);
        Self {
            executor: SyncExecutor::new(reconciler.clone()),
            forcer: FilmForcer::new(reconciler.clone()),
            reconciler,
        }
    }

    /// Classifies the external snapshot without mutating anything.
    pub async fn sync_status(&self) -> Result<Vec<SyncOutcome>, SyncError> {
        self.reconciler.current_outcomes().await
    }

    pub async fn sync_by_status(&self, request: &SyncRequest) -> Result<Vec<Film>, SyncError> {
        let selection = request.selection();
        if selection.is_empty() {
            return Err(SyncError::NoStatusSelected);
        }
        Ok(self.executor.run(&selection).await)
    }

    pub async fn force_update(&self, external_id: &str) -> Result<Option<Film>, SyncError> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(SyncError::MissingExternalId);
        }
        self.forcer.force_sync(external_id).await
    }

    pub fn is_syncing(&self) -> bool {
        self.executor.is_running()
    }
}
