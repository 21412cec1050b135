//! Forced upsert of a single film from the external source.

use holocron_core::Film;
use holocron_storage::DynFilmStore;
use tracing::{info, warn};

use crate::error::SyncError;
use crate::projection::{apply_external, new_film_from_external};
use crate::reconciler::Reconciler;

/// Upserts one external record regardless of its classification.
///
/// Does not take the executor's run guard.
#[derive(Clone)]
pub struct FilmForcer {
    reconciler: Reconciler,
}

impl FilmForcer {
    pub fn new(reconciler: Reconciler) -> Self {
        Self { reconciler }
    }

    /// Returns `Ok(None)` when the source is unavailable or has no record
    /// with `external_id`.
    pub async fn force_sync(&self, external_id: &str) -> Result<Option<Film>, SyncError> {
        let snapshot = self.reconciler.fetch_snapshot().await;
        let Some(external) = snapshot.into_iter().find(|e| e.external_id == external_id) else {
            warn!(external_id, "Film not found in external source");
            return Ok(None);
        };

        let store: &DynFilmStore = self.reconciler.store();
        let film = match store.get_by_external_id(external_id).await? {
            None => {
                let staged = store.add(new_film_from_external(&external)).await?;
                store.commit().await?;
                info!(film_id = staged.id, external_id, "Force-added film from external source");
                staged
            }
            Some(mut film) => {
                apply_external(&mut film, &external);
                let staged = store.update(film).await?;
                store.commit().await?;
                info!(film_id = staged.id, external_id, "Force-updated film from external source");
                staged
            }
        };
        Ok(Some(film))
    }
}
