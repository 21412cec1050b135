//! Read-only classification of the external snapshot against the local store.

use std::collections::HashMap;

use holocron_core::{ExternalFilm, Film};
use holocron_storage::DynFilmStore;
use holocron_swapi::DynExternalSource;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::status::SyncOutcome;

/// Local films keyed by external id.
#[derive(Debug, Clone, Default)]
pub struct LocalIndex {
    by_external_id: HashMap<String, Film>,
}

impl LocalIndex {
    /// Builds the index. When several films share an external id, the one
    /// appearing last in `films` wins.
    pub fn from_films(films: impl IntoIterator<Item = Film>) -> Self {
        let mut by_external_id = HashMap::new();
        for film in films {
            let external_id = film.external_id.clone();
            if let Some(previous) = by_external_id.insert(external_id, film) {
                debug!(
                    external_id = %previous.external_id,
                    replaced_id = previous.id,
                    "Duplicate external id in local store; keeping the later film"
                );
            }
        }
        Self { by_external_id }
    }

    pub fn get(&self, external_id: &str) -> Option<&Film> {
        self.by_external_id.get(external_id)
    }

    pub fn len(&self) -> usize {
        self.by_external_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_external_id.is_empty()
    }
}

/// Classifies every snapshot record, preserving snapshot order.
///
/// Films that exist only locally produce no outcome.
pub fn classify(snapshot: &[ExternalFilm], local_index: &LocalIndex) -> Vec<SyncOutcome> {
    snapshot
        .iter()
        .map(|external| {
            let local = local_index.get(&external.external_id).cloned();
            SyncOutcome::classified(external.clone(), local)
        })
        .collect()
}

/// Couples an external source with the local store for classification.
#[derive(Clone)]
pub struct Reconciler {
    store: DynFilmStore,
    source: DynExternalSource,
}

impl Reconciler {
    pub fn new(store: DynFilmStore, source: DynExternalSource) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &DynFilmStore {
        &self.store
    }

    /// Fetches the external snapshot, degrading source failures to an empty list.
    pub async fn fetch_snapshot(&self) -> Vec<ExternalFilm> {
        match self.source.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    source = self.source.source_name(),
                    error = %e,
                    "External source unavailable; treating snapshot as empty"
                );
                Vec::new()
            }
        }
    }

    /// Classifies the current external snapshot against the store.
    ///
    /// # Errors
    ///
    /// Store lookup failures are returned as `SyncError::Storage`.
    pub async fn current_outcomes(&self) -> Result<Vec<SyncOutcome>, SyncError> {
        let snapshot = self.fetch_snapshot().await;
        if snapshot.is_empty() {
            return Ok(Vec::new());
        }

        let external_ids: Vec<String> = snapshot.iter().map(|e| e.external_id.clone()).collect();
        let local_films = self.store.get_by_external_ids(&external_ids).await?;
        let local_index = LocalIndex::from_films(local_films);

        let outcomes = classify(&snapshot, &local_index);
        debug!(
            external = snapshot.len(),
            matched = local_index.len(),
            "Classified external snapshot"
        );
        Ok(outcomes)
    }
}
