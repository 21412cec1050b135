use std::sync::Arc;

use async_trait::async_trait;
use holocron_core::ExternalFilm;

use crate::error::SourceError;

/// A provider of the full external catalog snapshot.
#[async_trait]
pub trait ExternalSource: Send + Sync {
    /// Fetches every record currently published upstream.
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalFilm>, SourceError>;

    /// Short name used in logs.
    fn source_name(&self) -> &'static str;
}

pub type DynExternalSource = Arc<dyn ExternalSource>;

/// Serves a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    films: Vec<ExternalFilm>,
}

impl StaticSource {
    pub fn new(films: Vec<ExternalFilm>) -> Self {
        Self { films }
    }
}

#[async_trait]
impl ExternalSource for StaticSource {
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalFilm>, SourceError> {
        Ok(self.films.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that ExternalSource is object-safe
    fn _assert_source_object_safe(_: &dyn ExternalSource) {}

    #[tokio::test]
    async fn test_static_source_returns_snapshot() {
        let source = StaticSource::default();
        assert!(source.fetch_snapshot().await.unwrap().is_empty());
        assert_eq!(source.source_name(), "static");
    }
}
