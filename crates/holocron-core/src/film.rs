//! Catalog record types.
//!
//! [`Film`] is the locally persisted record. [`ExternalFilm`] is one entry of
//! the upstream catalog snapshot after its timestamps have been parsed.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Local surrogate key. `0` means "not yet assigned by the store".
pub type FilmId = i64;

/// A film as stored in the local catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: FilmId,
    /// Stable upstream identifier. Never rewritten once the film exists.
    pub external_id: String,
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_external: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub edited_external: OffsetDateTime,
    /// Soft-delete tombstone.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

impl Film {
    /// Returns true when the film has not been soft-deleted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Returns true once the store has assigned an id.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// A film entry from the upstream catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFilm {
    pub external_id: String,
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    /// Upstream "last edited" timestamp; drives classification.
    #[serde(with = "time::serde::rfc3339")]
    pub edited: OffsetDateTime,
}

/// Editable fields of a film, as supplied by catalog CRUD callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDraft {
    #[serde(default)]
    pub external_id: String,
    pub title: String,
    pub episode_id: i32,
    #[serde(default)]
    pub opening_crawl: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub producer: String,
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
    #[serde(default)]
    pub url: String,
}
