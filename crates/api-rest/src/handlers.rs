//! REST handlers for the song catalog.
//!
//! Handlers only translate between the wire format and [`CatalogService`] calls: they parse
//! path ids, query strings and bodies, and turn results into JSON. All rules live in the
//! catalog service.

use api_shared::{
    AddSongReq, ErrorRes, HealthRes, HealthService, ListSongsParams, SongRes, TextPageParams,
    UpdateSongReq,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use songlib_core::{CatalogError, Song, SongId, SongListQuery, SongUpdate};

use crate::error::ApiError;
use crate::AppState;

pub(crate) fn song_res(song: Song) -> SongRes {
    SongRes {
        id: song.id,
        group: song.group_name,
        song: song.title,
        release_date: song.release_date,
        text: song.text,
        link: song.link,
        created_at: song.created_at.to_rfc3339(),
        updated_at: song.updated_at.to_rfc3339(),
    }
}

fn parse_id(raw: &str) -> Result<SongId, ApiError> {
    raw.trim()
        .parse::<SongId>()
        .map_err(|_| ApiError(CatalogError::InvalidRequest(format!("invalid song id '{raw}'"))))
}

/// Paging values that are not integers are treated as absent.
fn parse_paging(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/songs",
    request_body = AddSongReq,
    responses(
        (status = 201, description = "Song enriched and stored", body = SongRes),
        (status = 400, description = "Malformed body, or group or song missing", body = ErrorRes),
        (status = 502, description = "Lookup service failed", body = ErrorRes),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// Add a song.
///
/// Looks up release date, lyrics and link from the enrichment service and stores the
/// complete record. Nothing is stored if the lookup fails.
#[axum::debug_handler]
pub(crate) async fn add_song(
    State(state): State<AppState>,
    body: Result<Json<AddSongReq>, JsonRejection>,
) -> Result<(StatusCode, Json<SongRes>), ApiError> {
    let Json(req) = body?;
    let song = state.catalog.add_song(&req.group, &req.song).await?;
    Ok((StatusCode::CREATED, Json(song_res(song))))
}

#[utoipa::path(
    get,
    path = "/songs",
    params(ListSongsParams),
    responses(
        (status = 200, description = "One page of matching songs", body = [SongRes]),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// List songs, optionally filtered by group and title, one page at a time.
#[axum::debug_handler]
pub(crate) async fn list_songs(
    State(state): State<AppState>,
    Query(params): Query<ListSongsParams>,
) -> Result<Json<Vec<SongRes>>, ApiError> {
    let query = SongListQuery {
        page: parse_paging(params.page.as_deref()),
        limit: parse_paging(params.limit.as_deref()),
        group_name: params.group,
        title: params.song,
    };

    let songs = state.catalog.list_songs(&query).await?;
    Ok(Json(songs.into_iter().map(song_res).collect()))
}

#[utoipa::path(
    get,
    path = "/songs/{id}",
    params(("id" = i64, Path, description = "Song id")),
    responses(
        (status = 200, description = "The song", body = SongRes),
        (status = 400, description = "Malformed id", body = ErrorRes),
        (status = 404, description = "Song not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SongRes>, ApiError> {
    let song = state.catalog.get_song(parse_id(&id)?).await?;
    Ok(Json(song_res(song)))
}

#[utoipa::path(
    get,
    path = "/songs/{id}/text",
    params(("id" = i64, Path, description = "Song id"), TextPageParams),
    responses(
        (status = 200, description = "One page of verses; empty past the last verse", body = [String]),
        (status = 400, description = "Malformed id", body = ErrorRes),
        (status = 404, description = "Song not found", body = ErrorRes)
    )
)]
/// Page through a song's lyrics verse by verse.
#[axum::debug_handler]
pub(crate) async fn get_song_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<TextPageParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let verses = state
        .catalog
        .get_song_text(
            parse_id(&id)?,
            parse_paging(params.page.as_deref()),
            parse_paging(params.limit.as_deref()),
        )
        .await?;
    Ok(Json(verses))
}

#[utoipa::path(
    put,
    path = "/songs/{id}",
    params(("id" = i64, Path, description = "Song id")),
    request_body = UpdateSongReq,
    responses(
        (status = 200, description = "Updated song", body = SongRes),
        (status = 400, description = "Malformed id or body, or blank group/song", body = ErrorRes),
        (status = 404, description = "Song not found", body = ErrorRes),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
/// Update a song. Only the supplied fields change.
#[axum::debug_handler]
pub(crate) async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSongReq>, JsonRejection>,
) -> Result<Json<SongRes>, ApiError> {
    let Json(req) = body?;
    let update = SongUpdate {
        group_name: req.group,
        title: req.song,
        release_date: req.release_date,
        text: req.text,
        link: req.link,
    };

    let song = state.catalog.update_song(parse_id(&id)?, update).await?;
    Ok(Json(song_res(song)))
}

#[utoipa::path(
    delete,
    path = "/songs/{id}",
    params(("id" = i64, Path, description = "Song id")),
    responses(
        (status = 204, description = "Song deleted"),
        (status = 400, description = "Malformed id", body = ErrorRes),
        (status = 404, description = "Song not found", body = ErrorRes),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_song(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
