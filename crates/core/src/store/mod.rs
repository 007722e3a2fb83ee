//! Persistence contract for songs.
//!
//! The catalog service only talks to [`SongStore`]; [`sqlite::SqliteSongStore`] is the
//! production implementation.

pub mod sqlite;

use async_trait::async_trait;

use crate::song::{NewSong, Song, SongId};

pub use sqlite::{init_db, SqliteSongStore};

/// Errors reported by a song store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No live song has the requested id.
    #[error("song not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Song fields that list queries can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    GroupName,
    Title,
}

impl FilterField {
    /// Column holding the case-folded value of this field.
    pub(crate) fn column(self) -> &'static str {
        match self {
            FilterField::GroupName => "group_name_folded",
            FilterField::Title => "title_folded",
        }
    }
}

/// Case folding used for filtering. Stores persist this form alongside the original value.
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Case-insensitive substring predicate on a song field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongFilter {
    field: FilterField,
    needle: String,
}

impl SongFilter {
    /// Builds a filter, or `None` when `needle` is empty (an empty filter matches everything).
    pub fn new(field: FilterField, needle: impl Into<String>) -> Option<Self> {
        let needle = needle.into();
        if needle.is_empty() {
            return None;
        }
        Some(Self { field, needle })
    }

    pub fn field(&self) -> FilterField {
        self.field
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// The needle in folded form, comparable against [`fold`]ed field values.
    pub fn folded_needle(&self) -> String {
        fold(&self.needle)
    }

    /// Whether `song` satisfies this predicate.
    pub fn matches(&self, song: &Song) -> bool {
        let haystack = match self.field {
            FilterField::GroupName => &song.group_name,
            FilterField::Title => &song.title,
        };
        fold(haystack).contains(&self.folded_needle())
    }
}

/// Durable storage for songs.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Persists a new song and returns it with its assigned id.
    async fn create(&self, song: NewSong) -> StoreResult<Song>;

    /// Fetches a live song. Returns `StoreError::NotFound` if absent or deleted.
    async fn get_by_id(&self, id: SongId) -> StoreResult<Song>;

    /// Replaces every mutable field of the stored song with the values in `song`.
    async fn update(&self, song: &Song) -> StoreResult<Song>;

    /// Deletes a song. Returns `StoreError::NotFound` if there is no live song with that id.
    async fn delete_by_id(&self, id: SongId) -> StoreResult<()>;

    /// Returns live songs matching every filter, ordered by id, skipping `offset` and
    /// returning at most `limit`.
    async fn query_paged(
        &self,
        filters: &[SongFilter],
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<Song>>;
}
