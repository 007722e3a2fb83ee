//! JSON request and response bodies.
//!
//! Field names follow the public API: a song's group is `group`, its title is `song`, and
//! multi-word fields are camelCase (`releaseDate`, `createdAt`).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Body of `POST /songs`.
///
/// Missing fields deserialise as empty strings so that they are reported as a bad request by
/// the catalog's own validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddSongReq {
    #[schema(example = "Muse")]
    pub group: String,
    #[schema(example = "Supermassive Black Hole")]
    pub song: String,
}

/// Body of `PUT /songs/{id}`. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSongReq {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongRes {
    pub id: i64,
    pub group: String,
    pub song: String,
    #[schema(example = "16.07.2006")]
    pub release_date: String,
    pub text: String,
    pub link: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp of the last update.
    pub updated_at: String,
}

/// Query string of `GET /songs`.
///
/// Paging values are kept as raw strings; values that are not positive integers fall back to
/// the defaults (page 1, limit 10).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSongsParams {
    /// Case-insensitive substring of the group name.
    pub group: Option<String>,
    /// Case-insensitive substring of the song title.
    pub song: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query string of `GET /songs/{id}/text`. Defaults: page 1, limit 1 verse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TextPageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}
