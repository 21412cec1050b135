use thiserror::Error;

/// Errors raised while fetching the external snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Http(String),

    /// The upstream answered with a non-success status code.
    #[error("HTTP error: status {0}")]
    Status(u16),

    /// The response body was not a valid films envelope.
    #[error("Failed to decode films response: {0}")]
    Decode(String),

    /// A record carried data that could not be parsed (e.g. a bad timestamp).
    #[error("Invalid record {uid}: {message}")]
    InvalidRecord { uid: String, message: String },
}

impl SourceError {
    pub fn invalid_record(uid: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            uid: uid.into(),
            message: message.into(),
        }
    }

    /// Returns true for failures a later retry could plausibly fix.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status(code) => *code >= 500 || *code == 429,
            Self::Decode(_) | Self::InvalidRecord { .. } => false,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Http(err.to_string())
        }
    }
}
