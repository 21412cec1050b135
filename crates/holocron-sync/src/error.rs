//! Errors raised by the sync services.

use holocron_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("At least one status must be selected")]
    NoStatusSelected,

    #[error("External id must not be empty")]
    MissingExternalId,
}

impl SyncError {
    /// Returns true if the caller supplied an invalid request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NoStatusSelected | Self::MissingExternalId)
    }

    pub fn storage(&self) -> Option<&StorageError> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}
