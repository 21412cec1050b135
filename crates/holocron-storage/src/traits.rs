//! Store traits for the film catalog.

use async_trait::async_trait;
use holocron_core::{Film, FilmId};

use crate::error::StorageError;

/// The contract every local film store must implement.
///
/// Writes (`add*`, `update*`) are staged and become visible on [`commit`].
/// Implementations must be thread-safe (`Send + Sync`) and serialize their own
/// commits; callers do not hold locks across batches.
///
/// [`commit`]: FilmStore::commit
#[async_trait]
pub trait FilmStore: Send + Sync {
    // ==================== Reads ====================

    /// Returns all live films.
    async fn get_all(&self) -> Result<Vec<Film>, StorageError>;

    /// Returns a live film by its local id.
    ///
    /// Soft-deleted films are reported as `None`.
    async fn get_by_id(&self, id: FilmId) -> Result<Option<Film>, StorageError>;

    /// Returns the film with the given external id, live or soft-deleted.
    ///
    /// If several films share the external id, the one with the highest local
    /// id wins.
    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<Film>, StorageError>;

    /// Returns every film (live or soft-deleted) whose external id is in `external_ids`.
    ///
    /// Results are ordered by local id. Duplicated external ids are returned as-is;
    /// deduplication is the caller's concern.
    async fn get_by_external_ids(
        &self,
        external_ids: &[String],
    ) -> Result<Vec<Film>, StorageError>;

    // ==================== Staged writes ====================

    /// Stages a new film. The returned film carries its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the film already has an id.
    async fn add(&self, film: Film) -> Result<Film, StorageError>;

    /// Stages a batch of new films. Ids are assigned in input order.
    async fn add_batch(&self, films: Vec<Film>) -> Result<Vec<Film>, StorageError>;

    /// Stages an update of an existing film.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no film (live or soft-deleted) has this id.
    async fn update(&self, film: Film) -> Result<Film, StorageError>;

    /// Stages updates of several existing films.
    async fn update_batch(&self, films: Vec<Film>) -> Result<Vec<Film>, StorageError>;

    /// Makes every staged write visible.
    ///
    /// The staged queue is one unit of work shared by every caller of the
    /// store, not a per-caller transaction: a commit applies writes staged by
    /// concurrent callers too, and a failed commit discards them as well.
    /// Callers that need isolation stage and commit without yielding in
    /// between, as the sync executor does per bucket.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a staged insert collides with a
    /// committed film. Nothing from the failed commit is applied and the whole
    /// staged queue is dropped.
    async fn commit(&self) -> Result<(), StorageError>;

    // ==================== Metadata ====================

    /// Returns the name of this store backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
