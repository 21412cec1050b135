#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use holocron_core::{ExternalFilm, Film, FilmId};
use holocron_db_memory::InMemoryFilmStore;
use holocron_storage::{DynFilmStore, FilmStore, StorageError};
use holocron_swapi::{DynExternalSource, ExternalSource, SourceError, StaticSource};
use time::{Date, OffsetDateTime};
use tokio::sync::Notify;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Midnight UTC of an ISO calendar date, e.g. `day("2024-01-02")`.
pub fn day(iso: &str) -> OffsetDateTime {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(iso, format).unwrap().midnight().assume_utc()
}

pub fn external(uid: &str, edited: &str) -> ExternalFilm {
    ExternalFilm {
        external_id: uid.to_string(),
        title: format!("External film {uid}"),
        episode_id: uid.parse().unwrap_or_default(),
        opening_crawl: format!("Crawl {uid}"),
        director: "George Lucas".to_string(),
        producer: "Rick McCallum".to_string(),
        url: format!("https://www.swapi.tech/api/films/{uid}"),
        release_date: day("1999-05-19"),
        created: day("2014-12-19"),
        edited: day(edited),
    }
}

/// An unsaved local film whose descriptive fields differ from [`external`].
pub fn local_film(uid: &str, edited: &str) -> Film {
    Film {
        id: 0,
        external_id: uid.to_string(),
        title: format!("Local film {uid}"),
        episode_id: 0,
        opening_crawl: String::new(),
        director: "Local director".to_string(),
        producer: "Local producer".to_string(),
        url: String::new(),
        release_date: day("2000-01-01"),
        created_external: day("2014-12-19"),
        edited_external: day(edited),
        deleted_at: None,
    }
}

pub fn deleted_film(uid: &str, edited: &str, deleted: &str) -> Film {
    Film {
        deleted_at: Some(day(deleted)),
        ..local_film(uid, edited)
    }
}

pub fn static_source(films: Vec<ExternalFilm>) -> DynExternalSource {
    Arc::new(StaticSource::new(films))
}

pub fn memory_store(films: Vec<Film>) -> Arc<InMemoryFilmStore> {
    Arc::new(InMemoryFilmStore::with_films(films))
}

pub fn as_dyn(store: &Arc<InMemoryFilmStore>) -> DynFilmStore {
    store.clone()
}

/// A source that always fails.
pub struct FailingSource;

#[async_trait]
impl ExternalSource for FailingSource {
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalFilm>, SourceError> {
        Err(SourceError::Status(503))
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}

/// A source that parks every fetch until released.
pub struct GatedSource {
    films: Vec<ExternalFilm>,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedSource {
    pub fn new(films: Vec<ExternalFilm>) -> Self {
        Self {
            films,
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl ExternalSource for GatedSource {
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalFilm>, SourceError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.films.clone())
    }

    fn source_name(&self) -> &'static str {
        "gated"
    }
}

/// Wraps the in-memory store and fails the n-th commit (1-based).
pub struct FailingCommitStore {
    pub inner: InMemoryFilmStore,
    fail_on_commit: usize,
    commits: AtomicUsize,
}

impl FailingCommitStore {
    pub fn new(inner: InMemoryFilmStore, fail_on_commit: usize) -> Self {
        Self {
            inner,
            fail_on_commit,
            commits: AtomicUsize::new(0),
        }
    }

    pub fn commit_attempts(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilmStore for FailingCommitStore {
    async fn get_all(&self) -> Result<Vec<Film>, StorageError> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: FilmId) -> Result<Option<Film>, StorageError> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<Film>, StorageError> {
        self.inner.get_by_external_id(external_id).await
    }

    async fn get_by_external_ids(
        &self,
        external_ids: &[String],
    ) -> Result<Vec<Film>, StorageError> {
        self.inner.get_by_external_ids(external_ids).await
    }

    async fn add(&self, film: Film) -> Result<Film, StorageError> {
        self.inner.add(film).await
    }

    async fn add_batch(&self, films: Vec<Film>) -> Result<Vec<Film>, StorageError> {
        self.inner.add_batch(films).await
    }

    async fn update(&self, film: Film) -> Result<Film, StorageError> {
        self.inner.update(film).await
    }

    async fn update_batch(&self, films: Vec<Film>) -> Result<Vec<Film>, StorageError> {
        self.inner.update_batch(films).await
    }

    async fn commit(&self) -> Result<(), StorageError> {
        let attempt = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on_commit {
            self.inner.rollback().await;
            return Err(StorageError::connection_error("connection reset during commit"));
        }
        self.inner.commit().await
    }

    fn backend_name(&self) -> &'static str {
        "failing-commit"
    }
}

/// Counts `WARN` events seen by the subscriber it is installed in.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// A source whose every fetch yields one film with a never-seen external id.
#[derive(Default)]
pub struct FreshIdSource {
    fetches: AtomicUsize,
}

#[async_trait]
impl ExternalSource for FreshIdSource {
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalFilm>, SourceError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(vec![external(&format!("fresh-{n}"), "2024-01-02")])
    }

    fn source_name(&self) -> &'static str {
        "fresh-id"
    }
}
