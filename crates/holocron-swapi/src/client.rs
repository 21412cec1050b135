use std::time::Duration;

use async_trait::async_trait;
use holocron_core::ExternalFilm;
use reqwest::Client;

use crate::error::SourceError;
use crate::model::SwapiFilmEnvelope;
use crate::source::ExternalSource;

/// Public SWAPI mirror used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.swapi.tech/api";

/// Configuration for [`SwapiClient`].
#[derive(Debug, Clone)]
pub struct SwapiClientConfig {
    /// API root; the films collection lives at `{base_url}/films`.
    pub base_url: String,
    /// HTTP request timeout (default: 10 seconds).
    pub request_timeout: Duration,
}

impl Default for SwapiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl SwapiClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Fetches the films snapshot from a SWAPI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http_client: Client,
    films_url: String,
}

impl SwapiClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be built.
    pub fn new(config: SwapiClientConfig) -> Result<Self, SourceError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("holocron/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            films_url: format!("{}/films", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn films_url(&self) -> &str {
        &self.films_url
    }
}

#[async_trait]
impl ExternalSource for SwapiClient {
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalFilm>, SourceError> {
        let response = self
            .http_client
            .get(&self.films_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.films_url, error = %e, "Failed to fetch films");
                SourceError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let envelope: SwapiFilmEnvelope = response.json().await.map_err(|e| {
            tracing::warn!(url = %self.films_url, error = %e, "Failed to decode films response");
            SourceError::Decode(e.to_string())
        })?;

        let snapshot = envelope.into_snapshot()?;
        tracing::debug!(count = snapshot.len(), "Fetched external films snapshot");
        Ok(snapshot)
    }

    fn source_name(&self) -> &'static str {
        "swapi"
    }
}
