//! In-memory film store for the holocron catalog.
//!
//! This crate provides an in-memory implementation of the `FilmStore` trait
//! from `holocron-storage`, using papaya lock-free HashMap for concurrent reads.
//! Writes are staged and applied together on `commit`.
//!
//! # Example
//!
//! ```ignore
//! use holocron_db_memory::InMemoryFilmStore;
//! use holocron_storage::FilmStore;
//!
//! let store = InMemoryFilmStore::new();
//! let staged = store.add(film).await?;
//! store.commit().await?;
//! assert!(store.get_by_id(staged.id).await?.is_some());
//! ```

pub mod factory;
pub mod storage;

pub use holocron_storage::{FilmStore, StorageError};

pub use factory::{StoreBackend, StoreConfig, StoreOptions, create_film_store};
pub use storage::{CommitStats, InMemoryFilmStore};
