//! Catalog service: the business rules of the song library.
//!
//! ## Operations
//!
//! - **add**: validate group/title, enrich via the lookup service, then persist. If enrichment
//!   fails nothing is written.
//! - **list**: AND-combined case-insensitive substring filters on group and title, paged with
//!   `offset = (page - 1) * limit`.
//! - **get / get text**: single-song reads; the text read splits lyrics into verses and pages
//!   over them.
//! - **update**: read, merge the supplied fields, write back.
//! - **delete**: delegated to the store; deleting an unknown id is `NotFound`.
//!
//! Pages and limits that are absent or not positive fall back to their defaults. An optional
//! cap from [`CoreConfig`] bounds the limit of both list and text pages.

use std::sync::Arc;

use crate::config::CoreConfig;
use crate::constants::{DEFAULT_PAGE, DEFAULT_SONG_PAGE_LIMIT, DEFAULT_VERSE_PAGE_LIMIT};
use crate::enrichment::SongDetailSource;
use crate::song::{NewSong, Song, SongId, SongPatch};
use crate::store::{FilterField, SongFilter, SongStore};
use crate::validation::{optional_text, require_text};
use crate::verses;
use crate::{CatalogError, CatalogResult};

/// A resolved page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub limit: u64,
}

impl Page {
    /// Applies defaults to caller-supplied paging values.
    ///
    /// Absent or non-positive values are replaced by `DEFAULT_PAGE` and `default_limit`; the
    /// limit is then clamped to `max_limit` if one is set.
    pub fn resolve(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: u64,
        max_limit: Option<u64>,
    ) -> Self {
        let positive = |v: Option<i64>| v.filter(|n| *n > 0).map(|n| n.unsigned_abs());

        let number = positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = positive(limit).unwrap_or(default_limit);
        let limit = match max_limit {
            Some(max) => limit.min(max),
            None => limit,
        };

        Self { number, limit }
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.limit)
    }
}

/// Parameters of a song listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongListQuery {
    pub group_name: Option<String>,
    pub title: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl SongListQuery {
    /// Builds the store filters; empty values are ignored.
    pub fn filters(&self) -> Vec<SongFilter> {
        [
            (FilterField::GroupName, self.group_name.as_deref()),
            (FilterField::Title, self.title.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, needle)| needle.and_then(|n| SongFilter::new(field, n)))
        .collect()
    }
}

/// Raw, unvalidated update fields as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongUpdate {
    pub group_name: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongUpdate {
    /// Validates the update. A supplied group or title must not be blank.
    pub fn into_patch(self) -> CatalogResult<SongPatch> {
        Ok(SongPatch {
            group_name: optional_text("group", self.group_name.as_deref())?,
            title: optional_text("song", self.title.as_deref())?,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        })
    }
}

/// Orchestrates catalog operations over a song store and a detail source.
///
/// Cheap to clone; clones share the same store and client.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn SongStore>,
    details: Arc<dyn SongDetailSource>,
    max_page_limit: Option<u64>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn SongStore>, details: Arc<dyn SongDetailSource>) -> Self {
        Self {
            store,
            details,
            max_page_limit: None,
        }
    }

    /// Creates a service that applies the paging policy from `cfg`.
    pub fn with_config(
        cfg: &CoreConfig,
        store: Arc<dyn SongStore>,
        details: Arc<dyn SongDetailSource>,
    ) -> Self {
        Self {
            max_page_limit: cfg.max_page_limit(),
            ..Self::new(store, details)
        }
    }

    /// Adds a song after resolving its details from the lookup service.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if group or title is blank,
    /// - `EnrichmentFailed` if the lookup fails (nothing is persisted),
    /// - `PersistenceFailed` if the store rejects the write.
    pub async fn add_song(&self, group_name: &str, title: &str) -> CatalogResult<Song> {
        let group_name = require_text("group", group_name)?;
        let title = require_text("song", title)?;

        let detail = self
            .details
            .fetch_detail(group_name.as_str(), title.as_str())
            .await
            .map_err(CatalogError::EnrichmentFailed)?;

        let song = self
            .store
            .create(NewSong::new(group_name, title, detail))
            .await
            .map_err(CatalogError::PersistenceFailed)?;

        tracing::info!(id = song.id, group = %song.group_name, song = %song.title, "song added");
        Ok(song)
    }

    /// Lists songs matching the query's filters, one page at a time.
    pub async fn list_songs(&self, query: &SongListQuery) -> CatalogResult<Vec<Song>> {
        let page = Page::resolve(
            query.page,
            query.limit,
            DEFAULT_SONG_PAGE_LIMIT,
            self.max_page_limit,
        );

        self.store
            .query_paged(&query.filters(), page.offset(), page.limit)
            .await
            .map_err(CatalogError::PersistenceFailed)
    }

    pub async fn get_song(&self, id: SongId) -> CatalogResult<Song> {
        self.store
            .get_by_id(id)
            .await
            .map_err(|e| CatalogError::from_store(id, e))
    }

    /// Returns one page of verses from the song's lyrics.
    ///
    /// A page past the last verse is empty, not an error.
    pub async fn get_song_text(
        &self,
        id: SongId,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> CatalogResult<Vec<String>> {
        let song = self.get_song(id).await?;
        let page = Page::resolve(page, limit, DEFAULT_VERSE_PAGE_LIMIT, self.max_page_limit);

        let all = verses::segment(&song.text);
        Ok(verses::page(&all, page.offset(), page.limit)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    /// Merges the supplied fields into the stored song and writes it back.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if a supplied group or title is blank,
    /// - `NotFound` if the song does not exist,
    /// - `PersistenceFailed` if the store rejects the write.
    pub async fn update_song(&self, id: SongId, update: SongUpdate) -> CatalogResult<Song> {
        let patch = update.into_patch()?;
        let mut song = self.get_song(id).await?;

        patch.apply_to(&mut song);

        let song = self
            .store
            .update(&song)
            .await
            .map_err(|e| CatalogError::from_store(id, e))?;

        tracing::info!(id, "song updated");
        Ok(song)
    }

    pub async fn delete_song(&self, id: SongId) -> CatalogResult<()> {
        self.store
            .delete_by_id(id)
            .await
            .map_err(|e| CatalogError::from_store(id, e))?;

        tracing::info!(id, "song deleted");
        Ok(())
    }
}
