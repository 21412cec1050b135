//! Reconciliation engine for the holocron film catalog.
//!
//! The engine compares the local store with a snapshot of the external
//! catalog and classifies each external record into a [`SyncStatus`]:
//!
//! - [`reconciler`] - read-only classification
//! - [`executor`] - applies the mutations for selected statuses, single-flight
//! - [`force`] - unconditional upsert of one external record
//! - [`service`] - facade used by the HTTP layer
//! - [`catalog`] - plain CRUD over live films with soft delete

pub mod catalog;
pub mod error;
pub mod executor;
pub mod force;
pub mod projection;
pub mod reconciler;
pub mod service;
pub mod status;

pub use catalog::CatalogService;
pub use error::SyncError;
pub use executor::SyncExecutor;
pub use force::FilmForcer;
pub use reconciler::{LocalIndex, Reconciler, classify};
pub use service::SyncService;
pub use status::{StatusSelection, SyncOutcome, SyncRequest, SyncStatus};
