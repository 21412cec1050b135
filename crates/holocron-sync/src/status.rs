//! Classification results and status selections.

use std::collections::BTreeSet;
use std::fmt;

use holocron_core::{ExternalFilm, Film};
use serde::{Deserialize, Serialize};

/// How an external record relates to the local catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncStatus {
    /// No local film carries the external id.
    NotPresentLocally,
    /// A live local film exists with the same `edited` timestamp.
    PresentAndUnchanged,
    /// The local film exists but has been soft-deleted.
    SoftDeletedLocally,
    /// The local copy was edited after the external record.
    LocalNewerThanExternal,
    /// The external record was edited after the local copy.
    ExternalNewerThanLocal,
}

impl SyncStatus {
    pub const ALL: [SyncStatus; 5] = [
        SyncStatus::NotPresentLocally,
        SyncStatus::PresentAndUnchanged,
        SyncStatus::SoftDeletedLocally,
        SyncStatus::LocalNewerThanExternal,
        SyncStatus::ExternalNewerThanLocal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotPresentLocally => "notPresentLocally",
            Self::PresentAndUnchanged => "presentAndUnchanged",
            Self::SoftDeletedLocally => "softDeletedLocally",
            Self::LocalNewerThanExternal => "localNewerThanExternal",
            Self::ExternalNewerThanLocal => "externalNewerThanLocal",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification of one external record.
///
/// `local` is `None` exactly when the status is [`SyncStatus::NotPresentLocally`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    status: SyncStatus,
    external: ExternalFilm,
    local: Option<Film>,
}

impl SyncOutcome {
    /// Classifies `external` against its local counterpart, if any.
    pub fn classified(external: ExternalFilm, local: Option<Film>) -> Self {
        let status = match &local {
            None => SyncStatus::NotPresentLocally,
            Some(film) if !film.is_live() => SyncStatus::SoftDeletedLocally,
            Some(film) => match film.edited_external.cmp(&external.edited) {
                std::cmp::Ordering::Greater => SyncStatus::LocalNewerThanExternal,
                std::cmp::Ordering::Less => SyncStatus::ExternalNewerThanLocal,
                std::cmp::Ordering::Equal => SyncStatus::PresentAndUnchanged,
            },
        };
        Self {
            status,
            external,
            local,
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn external(&self) -> &ExternalFilm {
        &self.external
    }

    pub fn local(&self) -> Option<&Film> {
        self.local.as_ref()
    }

    pub fn into_parts(self) -> (SyncStatus, ExternalFilm, Option<Film>) {
        (self.status, self.external, self.local)
    }
}

/// A set of statuses a sync run should act upon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSelection {
    statuses: BTreeSet<SyncStatus>,
}

impl StatusSelection {
    pub fn all() -> Self {
        SyncStatus::ALL.into_iter().collect()
    }

    pub fn only(status: SyncStatus) -> Self {
        std::iter::once(status).collect()
    }

    pub fn contains(&self, status: SyncStatus) -> bool {
        self.statuses.contains(&status)
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SyncStatus> + '_ {
        self.statuses.iter().copied()
    }
}

impl FromIterator<SyncStatus> for StatusSelection {
    fn from_iter<I: IntoIterator<Item = SyncStatus>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

/// Request body of a sync run: one flag per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncRequest {
    pub not_present_locally: bool,
    pub present_and_unchanged: bool,
    pub soft_deleted_locally: bool,
    pub local_newer_than_external: bool,
    pub external_newer_than_local: bool,
}

impl SyncRequest {
    pub fn selection(&self) -> StatusSelection {
        [
            (self.not_present_locally, SyncStatus::NotPresentLocally),
            (self.present_and_unchanged, SyncStatus::PresentAndUnchanged),
            (self.soft_deleted_locally, SyncStatus::SoftDeletedLocally),
            (self.local_newer_than_external, SyncStatus::LocalNewerThanExternal),
            (self.external_newer_than_local, SyncStatus::ExternalNewerThanLocal),
        ]
        .into_iter()
        .filter_map(|(selected, status)| selected.then_some(status))
        .collect()
    }
}
