//! Wire types of the SWAPI films endpoint.
//!
//! ```json
//! { "message": "ok",
//!   "result": [ { "uid": "1", "properties": { "title": "A New Hope", ... } } ] }
//! ```
//!
//! Unknown fields (`characters`, `planets`, `_id`, ...) are ignored.

use holocron_core::{ExternalFilm, parse_timestamp};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapiFilmEnvelope {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Vec<SwapiFilmResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapiFilmResult {
    pub uid: String,
    #[serde(default)]
    pub properties: SwapiFilmProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapiFilmProperties {
    pub title: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub created: String,
    pub edited: String,
    pub episode_id: i32,
    pub opening_crawl: String,
    pub url: String,
}

impl SwapiFilmResult {
    /// Converts the wire record into an [`ExternalFilm`], parsing its timestamps.
    pub fn into_external(self) -> Result<ExternalFilm, SourceError> {
        let uid = self.uid;
        let props = self.properties;
        let parse = |field: &str, value: &str| {
            parse_timestamp(value)
                .map_err(|e| SourceError::invalid_record(uid.clone(), format!("{field}: {e}")))
        };

        let release_date = parse("release_date", &props.release_date)?;
        let created = parse("created", &props.created)?;
        let edited = parse("edited", &props.edited)?;

        Ok(ExternalFilm {
            external_id: uid,
            title: props.title,
            episode_id: props.episode_id,
            opening_crawl: props.opening_crawl,
            director: props.director,
            producer: props.producer,
            url: props.url,
            release_date,
            created,
            edited,
        })
    }
}

impl SwapiFilmEnvelope {
    /// Converts every record. One bad record fails the whole snapshot.
    pub fn into_snapshot(self) -> Result<Vec<ExternalFilm>, SourceError> {
        self.result
            .into_iter()
            .map(SwapiFilmResult::into_external)
            .collect()
    }
}
