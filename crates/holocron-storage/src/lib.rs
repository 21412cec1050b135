//! # holocron-storage
//!
//! Local store abstraction for the Holocron catalog.
//!
//! This crate defines the contract every film store must implement. It does
//! not contain any implementations - those are provided by separate crates
//! (see `holocron-db-memory`).
//!
//! ## Unit of work
//!
//! Writes are staged and only become visible on [`FilmStore::commit`]:
//!
//! ```ignore
//! use holocron_storage::{FilmStore, StorageError};
//!
//! async fn import(store: &dyn FilmStore, films: Vec<Film>) -> Result<Vec<Film>, StorageError> {
//!     let staged = store.add_batch(films).await?;
//!     store.commit().await?;
//!     Ok(staged)
//! }
//! ```
//!
//! ## Visibility of soft-deleted films
//!
//! `get_all` and `get_by_id` serve ordinary reads and only return live films.
//! `get_by_external_id` and `get_by_external_ids` return every film, including
//! soft-deleted ones, because reconciliation has to see tombstones.

mod error;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::FilmStore;

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shareable store trait object.
pub type DynFilmStore = std::sync::Arc<dyn FilmStore>;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::traits::FilmStore;
    pub use crate::{DynFilmStore, StorageResult};
}
