use crate::factory::StoreOptions;
use async_trait::async_trait;
use holocron_core::{Film, FilmId};
use holocron_storage::{FilmStore, StorageError};
use papaya::HashMap as PapayaHashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::{Mutex, RwLock};

/// A write staged for the next commit.
#[derive(Debug, Clone)]
enum PendingWrite {
    Insert(Film),
    Update(Film),
}

/// Counters describing the writes a store has committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub commits: u64,
    pub inserted: u64,
    pub updated: u64,
    pub failed_commits: u64,
}

/// In-memory film store using papaya lock-free HashMap.
///
/// This store provides:
/// - Lock-free concurrent reads via papaya::HashMap
/// - Staged writes applied together on `commit`
/// - Soft-delete aware reads (tombstoned films stay in the map)
#[derive(Debug)]
pub struct InMemoryFilmStore {
    /// Committed films keyed by local id
    pub(crate) data: Arc<PapayaHashMap<FilmId, Film>>,
    /// Writes staged since the last commit; the mutex also serializes commits
    pending: Mutex<Vec<PendingWrite>>,
    /// Atomic counter for generating local ids
    id_counter: AtomicI64,
    commit_stats: Arc<RwLock<CommitStats>>,
    /// Store configuration options (soft hints for in-memory backend)
    _options: StoreOptions,
}

impl InMemoryFilmStore {
    /// Creates a new in-memory store with default options.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Creates a new in-memory store with the given options.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            data: Arc::new(PapayaHashMap::new()),
            pending: Mutex::new(Vec::new()),
            id_counter: AtomicI64::new(1),
            commit_stats: Arc::new(RwLock::new(CommitStats::default())),
            _options: options,
        }
    }

    /// Creates a store pre-populated with committed films.
    ///
    /// Films without an id get one assigned; explicit ids are kept as given.
    pub fn with_films(films: impl IntoIterator<Item = Film>) -> Self {
        let store = Self::new();
        for film in films {
            store.seed(film);
        }
        store
    }

    /// Writes a film straight into the committed set, bypassing staging.
    ///
    /// Used for bootstrapping and fixtures. Overwrites any film with the same id.
    pub fn seed(&self, mut film: Film) -> Film {
        if film.is_persisted() {
            self.id_counter.fetch_max(film.id + 1, Ordering::SeqCst);
        } else {
            film.id = self.next_id();
        }
        let guard = self.data.pin();
        guard.insert(film.id, film.clone());
        film
    }

    /// Generates the next local id.
    pub(crate) fn next_id(&self) -> FilmId {
        self.id_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Returns every committed film (live or soft-deleted), ordered by id.
    pub fn snapshot(&self) -> Vec<Film> {
        let guard = self.data.pin();
        let mut films: Vec<Film> = guard.iter().map(|(_, film)| film.clone()).collect();
        films.sort_by_key(|film| film.id);
        films
    }

    /// Number of committed films, including soft-deleted ones.
    pub fn len(&self) -> usize {
        self.data.pin().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of writes waiting for the next commit.
    pub async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Drops every staged write without applying it.
    pub async fn rollback(&self) -> usize {
        let mut pending = self.pending.lock().await;
        let discarded = pending.len();
        pending.clear();
        discarded
    }

    pub async fn commit_stats(&self) -> CommitStats {
        self.commit_stats.read().await.clone()
    }

    fn collect_sorted(&self, mut predicate: impl FnMut(&Film) -> bool) -> Vec<Film> {
        let guard = self.data.pin();
        let mut films: Vec<Film> = guard
            .iter()
            .filter(|(_, film)| predicate(film))
            .map(|(_, film)| film.clone())
            .collect();
        films.sort_by_key(|film| film.id);
        films
    }

    fn find_colliding_insert(&self, writes: &[PendingWrite]) -> Option<FilmId> {
        let guard = self.data.pin();
        let mut inserted_ids = HashSet::new();
        writes.iter().find_map(|write| match write {
            PendingWrite::Insert(film)
                if guard.get(&film.id).is_some() || !inserted_ids.insert(film.id) =>
            {
                Some(film.id)
            }
            _ => None,
        })
    }

    fn stage_insert(&self, pending: &mut Vec<PendingWrite>, mut film: Film) -> Result<Film, StorageError> {
        if film.is_persisted() {
            return Err(StorageError::invalid_record(format!(
                "cannot add film {} that already has an id",
                film.id
            )));
        }
        film.id = self.next_id();
        pending.push(PendingWrite::Insert(film.clone()));
        Ok(film)
    }

    fn stage_update(&self, pending: &mut Vec<PendingWrite>, film: Film) -> Result<Film, StorageError> {
        if !film.is_persisted() {
            return Err(StorageError::invalid_record(
                "cannot update a film without an id",
            ));
        }
        let known = {
            let guard = self.data.pin();
            guard.get(&film.id).is_some()
        } || pending
            .iter()
            .any(|write| matches!(write, PendingWrite::Insert(staged) if staged.id == film.id));
        if !known {
            return Err(StorageError::not_found(film.id));
        }
        pending.push(PendingWrite::Update(film.clone()));
        Ok(film)
    }
}

impl Default for InMemoryFilmStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilmStore for InMemoryFilmStore {
    async fn get_all(&self) -> Result<Vec<Film>, StorageError> {
        Ok(self.collect_sorted(Film::is_live))
    }

    async fn get_by_id(&self, id: FilmId) -> Result<Option<Film>, StorageError> {
        let guard = self.data.pin();
        Ok(guard.get(&id).filter(|film| film.is_live()).cloned())
    }

    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<Film>, StorageError> {
        Ok(self
            .collect_sorted(|film| film.external_id == external_id)
            .pop())
    }

    async fn get_by_external_ids(
        &self,
        external_ids: &[String],
    ) -> Result<Vec<Film>, StorageError> {
        let wanted: HashSet<&str> = external_ids.iter().map(String::as_str).collect();
        Ok(self.collect_sorted(|film| wanted.contains(film.external_id.as_str())))
    }

    async fn add(&self, film: Film) -> Result<Film, StorageError> {
        let mut pending = self.pending.lock().await;
        self.stage_insert(&mut pending, film)
    }

    async fn add_batch(&self, films: Vec<Film>) -> Result<Vec<Film>, StorageError> {
        let mut pending = self.pending.lock().await;
        let mut staged = Vec::with_capacity(films.len());
        for film in films {
            staged.push(self.stage_insert(&mut pending, film)?);
        }
        Ok(staged)
    }

    async fn update(&self, film: Film) -> Result<Film, StorageError> {
        let mut pending = self.pending.lock().await;
        self.stage_update(&mut pending, film)
    }

    async fn update_batch(&self, films: Vec<Film>) -> Result<Vec<Film>, StorageError> {
        let mut pending = self.pending.lock().await;
        let mut staged = Vec::with_capacity(films.len());
        for film in films {
            staged.push(self.stage_update(&mut pending, film)?);
        }
        Ok(staged)
    }

    async fn commit(&self) -> Result<(), StorageError> {
        let mut pending = self.pending.lock().await;
        let writes = std::mem::take(&mut *pending);

        // Validate before applying so a failed commit leaves the map untouched
        if let Some(id) = self.find_colliding_insert(&writes) {
            self.commit_stats.write().await.failed_commits += 1;
            return Err(StorageError::already_exists(id));
        }

        let (mut inserted, mut updated) = (0u64, 0u64);
        {
            let guard = self.data.pin();
            for write in writes {
                match write {
                    PendingWrite::Insert(film) => {
                        guard.insert(film.id, film);
                        inserted += 1;
                    }
                    PendingWrite::Update(film) => {
                        guard.insert(film.id, film);
                        updated += 1;
                    }
                }
            }
        }

        let mut stats = self.commit_stats.write().await;
        stats.commits += 1;
        stats.inserted += inserted;
        stats.updated += updated;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "in-memory"
    }
}
