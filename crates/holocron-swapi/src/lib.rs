//! External catalog adapter for the SWAPI films endpoint.
//!
//! - [`ExternalSource`] - the snapshot contract the sync engine consumes
//! - [`SwapiClient`] - `reqwest` implementation against `{base_url}/films`
//! - [`StaticSource`] - fixed snapshot, for tests and offline runs
//! - [`SourceError`] - fetch and decode failures

pub mod client;
pub mod error;
pub mod model;
pub mod source;

pub use client::{DEFAULT_BASE_URL, SwapiClient, SwapiClientConfig};
pub use error::SourceError;
pub use model::{SwapiFilmEnvelope, SwapiFilmProperties, SwapiFilmResult};
pub use source::{DynExternalSource, ExternalSource, StaticSource};
