//! CRUD over live films. Deletes are soft.

use holocron_core::{Film, FilmDraft, FilmId, now_utc};
use holocron_storage::DynFilmStore;
use tracing::info;

use crate::error::SyncError;

#[derive(Clone)]
pub struct CatalogService {
    store: DynFilmStore,
}

impl CatalogService {
    pub fn new(store: DynFilmStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Film>, SyncError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn get(&self, id: FilmId) -> Result<Option<Film>, SyncError> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Creates a film, stamping both external timestamps with the current time.
    pub async fn create(&self, draft: FilmDraft) -> Result<Film, SyncError> {
        let now = now_utc();
        let film = Film {
            id: 0,
            external_id: draft.external_id,
            title: draft.title,
            episode_id: draft.episode_id,
            opening_crawl: draft.opening_crawl,
            director: draft.director,
            producer: draft.producer,
            url: draft.url,
            release_date: draft.release_date,
            created_external: now,
            edited_external: now,
            deleted_at: None,
        };
        let staged = self.store.add(film).await?;
        self.store.commit().await?;
        info!(film_id = staged.id, "Film created");
        Ok(staged)
    }

    /// Updates a live film. `external_id` and the tombstone are left untouched.
    pub async fn update(&self, id: FilmId, draft: FilmDraft) -> Result<Option<Film>, SyncError> {
        let Some(mut film) = self.store.get_by_id(id).await? else {
            return Ok(None);
        };
        film.title = draft.title;
        film.episode_id = draft.episode_id;
        film.opening_crawl = draft.opening_crawl;
        film.director = draft.director;
        film.producer = draft.producer;
        film.release_date = draft.release_date;
        film.url = draft.url;
        film.edited_external = now_utc();

        let staged = self.store.update(film).await?;
        self.store.commit().await?;
        Ok(Some(staged))
    }

    /// Soft-deletes a live film. Returns false if there is none with `id`.
    pub async fn delete(&self, id: FilmId) -> Result<bool, SyncError> {
        let Some(mut film) = self.store.get_by_id(id).await? else {
            return Ok(false);
        };
        film.deleted_at = Some(now_utc());
        self.store.update(film).await?;
        self.store.commit().await?;
        info!(film_id = id, "Film soft-deleted");
        Ok(true)
    }
}
