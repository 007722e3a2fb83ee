use crate::enrichment::EnrichmentError;
use crate::song::SongId;
use crate::store::StoreError;

/// Errors surfaced by catalog operations.
///
/// `InvalidRequest` and `NotFound` are attributable to the caller. `EnrichmentFailed` and
/// `PersistenceFailed` are dependency/server failures. `InvalidConfig` is only produced while
/// resolving configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("song {0} not found")]
    NotFound(SongId),
    #[error("failed to fetch song details: {0}")]
    EnrichmentFailed(#[source] EnrichmentError),
    #[error("failed to persist song: {0}")]
    PersistenceFailed(#[source] StoreError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CatalogError {
    /// Maps a store failure for the given song id, keeping "not found" distinct from
    /// genuine persistence failures.
    pub(crate) fn from_store(id: SongId, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CatalogError::NotFound(id),
            other => CatalogError::PersistenceFailed(other),
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
