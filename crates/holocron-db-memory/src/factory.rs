use std::sync::Arc;

use holocron_storage::DynFilmStore;
use serde::{Deserialize, Serialize};

use crate::InMemoryFilmStore;

/// Supported store backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    /// In-memory store implemented on top of papaya::HashMap
    #[default]
    InMemory,
}

/// Store-specific configuration options.
///
/// These are best-effort for the in-memory backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Optional preallocation hint (e.g., initial capacity). Not used by papaya.
    pub preallocate_items: Option<usize>,
}

/// Factory configuration to construct a film store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub options: StoreOptions,
}

/// Builds a shareable film store for the configured backend.
pub fn create_film_store(cfg: &StoreConfig) -> DynFilmStore {
    match cfg.backend {
        StoreBackend::InMemory => Arc::new(InMemoryFilmStore::with_options(cfg.options.clone())),
    }
}
