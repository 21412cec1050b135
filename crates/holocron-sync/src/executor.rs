//! Applies the mutations for a selection of sync statuses.

use std::sync::atomic::{AtomicBool, Ordering};

use holocron_core::Film;
use holocron_storage::{DynFilmStore, StorageError};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::projection::{apply_external, new_film_from_external, restore};
use crate::reconciler::Reconciler;
use crate::status::{StatusSelection, SyncOutcome, SyncStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BucketKind {
    New,
    Restored,
    ExternalUpdated,
    LocalForced,
}

impl BucketKind {
    fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Restored => "restored",
            Self::ExternalUpdated => "external_updated",
            Self::LocalForced => "local_forced",
        }
    }
}

#[derive(Debug, Default)]
struct Buckets {
    new: Vec<Film>,
    restored: Vec<Film>,
    external_updated: Vec<Film>,
    local_forced: Vec<Film>,
}

impl Buckets {
    fn partition(outcomes: Vec<SyncOutcome>, requested: &StatusSelection) -> Self {
        let mut buckets = Self::default();
        for outcome in outcomes {
            if !requested.contains(outcome.status()) {
                continue;
            }
            match outcome.into_parts() {
                (SyncStatus::NotPresentLocally, external, _) => {
                    buckets.new.push(new_film_from_external(&external));
                }
                (SyncStatus::SoftDeletedLocally, _, Some(mut film)) => {
                    restore(&mut film);
                    buckets.restored.push(film);
                }
                (SyncStatus::ExternalNewerThanLocal, external, Some(mut film)) => {
                    apply_external(&mut film, &external);
                    buckets.external_updated.push(film);
                }
                (SyncStatus::LocalNewerThanExternal, external, Some(mut film)) => {
                    info!(
                        film_id = film.id,
                        external_id = %film.external_id,
                        "Overwriting locally newer film from external source"
                    );
                    apply_external(&mut film, &external);
                    buckets.local_forced.push(film);
                }
                _ => {}
            }
        }
        buckets
    }

    fn into_ordered(self) -> [(BucketKind, Vec<Film>); 4] {
        [
            (BucketKind::New, self.new),
            (BucketKind::Restored, self.restored),
            (BucketKind::ExternalUpdated, self.external_updated),
            (BucketKind::LocalForced, self.local_forced),
        ]
    }
}

/// Clears the running flag when a run ends, including on early return.
struct RunningFlag<'a>(&'a AtomicBool);

impl<'a> RunningFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs batch syncs. At most one run per executor is in flight at a time.
///
/// `run_lock` decides who runs; `running` only reports it, so observers never
/// contend with callers of [`SyncExecutor::run`].
pub struct SyncExecutor {
    reconciler: Reconciler,
    run_lock: Mutex<()>,
    running: AtomicBool,
}

impl SyncExecutor {
    pub fn new(reconciler: Reconciler) -> Self {
        Self {
            reconciler,
            run_lock: Mutex::new(()),
            running: AtomicBool::new(false),
        }
    }

    /// Returns true while a run holds the guard.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Applies the mutations for every outcome whose status is in `requested`.
    ///
    /// Returns the touched films in bucket order: new, restored, externally
    /// updated, locally forced. A concurrent call returns an empty list without
    /// waiting. On failure the films of already committed buckets are returned.
    pub async fn run(&self, requested: &StatusSelection) -> Vec<Film> {
        let _guard = match self.run_lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("Sync already in progress; skipping this run");
                return Vec::new();
            }
        };
        let _running = RunningFlag::raise(&self.running);

        let outcomes = match self.reconciler.current_outcomes().await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                error!(error = %e, "Sync failed while classifying");
                return Vec::new();
            }
        };

        let buckets = Buckets::partition(outcomes, requested);
        let mut touched = Vec::new();
        if let Err(e) = self.persist(buckets, &mut touched).await {
            error!(
                error = %e,
                category = %e.category(),
                committed = touched.len(),
                "Sync failed; returning films committed so far"
            );
        }
        touched
    }

    async fn persist(&self, buckets: Buckets, touched: &mut Vec<Film>) -> Result<(), StorageError> {
        let store: &DynFilmStore = self.reconciler.store();
        for (kind, films) in buckets.into_ordered() {
            if films.is_empty() {
                continue;
            }
            let staged = match kind {
                BucketKind::New => store.add_batch(films).await?,
                _ => store.update_batch(films).await?,
            };
            store.commit().await?;
            info!(bucket = kind.label(), count = staged.len(), "Committed sync batch");
            touched.extend(staged);
        }
        Ok(())
    }
}
