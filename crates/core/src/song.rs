//! Song domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use songlib_types::NonEmptyText;

/// Store-assigned song identifier. Never reused, even after deletion.
pub type SongId = i64;

/// A persisted song record.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Song {
    pub id: SongId,
    pub group_name: String,
    pub title: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Details resolved by the enrichment service for a (group, title) pair.
///
/// Fields missing from the service response are left as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongDetail {
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// A fully populated song that has not been persisted yet.
///
/// Can only be built from validated names plus a successful enrichment result, so a song is
/// never stored with partially filled details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group_name: NonEmptyText,
    pub title: NonEmptyText,
    pub detail: SongDetail,
}

impl NewSong {
    pub fn new(group_name: NonEmptyText, title: NonEmptyText, detail: SongDetail) -> Self {
        Self {
            group_name,
            title,
            detail,
        }
    }
}

/// Field overrides for a song update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    pub group_name: Option<NonEmptyText>,
    pub title: Option<NonEmptyText>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongPatch {
    pub fn is_empty(&self) -> bool {
        self.group_name.is_none()
            && self.title.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }

    /// Applies the supplied overrides on top of `song`, leaving omitted fields untouched.
    pub fn apply_to(self, song: &mut Song) {
        if let Some(group_name) = self.group_name {
            song.group_name = group_name.into_inner();
        }
        if let Some(title) = self.title {
            song.title = title.into_inner();
        }
        if let Some(release_date) = self.release_date {
            song.release_date = release_date;
        }
        if let Some(text) = self.text {
            song.text = text;
        }
        if let Some(link) = self.link {
            song.link = link;
        }
    }
}
