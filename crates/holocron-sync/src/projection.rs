//! Field mapping from external records onto local films.
//!
//! None of these functions touch `id` or `external_id`.

use holocron_core::{ExternalFilm, Film};

/// Builds an unsaved film (`id == 0`, live) from an external record.
pub fn new_film_from_external(external: &ExternalFilm) -> Film {
    Film {
        id: 0,
        external_id: external.external_id.clone(),
        title: external.title.clone(),
        episode_id: external.episode_id,
        opening_crawl: external.opening_crawl.clone(),
        director: external.director.clone(),
        producer: external.producer.clone(),
        url: external.url.clone(),
        release_date: external.release_date,
        created_external: external.created,
        edited_external: external.edited,
        deleted_at: None,
    }
}

/// Overwrites every external-derived field of `film` and revives it.
pub fn apply_external(film: &mut Film, external: &ExternalFilm) {
    film.title.clone_from(&external.title);
    film.episode_id = external.episode_id;
    film.opening_crawl.clone_from(&external.opening_crawl);
    film.director.clone_from(&external.director);
    film.producer.clone_from(&external.producer);
    film.url.clone_from(&external.url);
    film.release_date = external.release_date;
    film.created_external = external.created;
    film.edited_external = external.edited;
    film.deleted_at = None;
}

/// Clears the soft-delete tombstone, leaving every other field as stored.
pub fn restore(film: &mut Film) {
    film.deleted_at = None;
}
