use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{playlist_item, song};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::ApiKeyUser;
use crate::extractors::json::AppJson;
use crate::models::song::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/songs",
    tag = "Songs",
    operation_id = "listSongs",
    summary = "List all songs",
    responses(
        (status = 200, description = "List of songs", body = Vec<SongResponse>),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _auth))]
pub async fn list_songs(
    _auth: ApiKeyUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SongResponse>>, AppError> {
    let rows = song::Entity::find()
        .order_by_asc(song::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(SongResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/songs",
    tag = "Songs",
    operation_id = "createSong",
    summary = "Add a new song",
    description = "Adds a song to the catalog. Admin only. Song names are unique; a duplicate yields 409 SONG_EXISTS.",
    request_body = CreateSongRequest,
    responses(
        (status = 201, description = "Song created", body = SongResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Duplicate song name (SONG_EXISTS)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth, payload), fields(name = %payload.name))]
pub async fn create_song(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSongRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    validate_create_song(&payload)?;

    let new_song = song::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        artist: Set(payload.artist),
        genre: Set(payload.genre),
        duration: Set(payload.duration),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_song.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SongExists,
        _ => AppError::from(e),
    })?;
    state.cache.invalidate_all();

    Ok((StatusCode::CREATED, Json(SongResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/songs/{id}",
    tag = "Songs",
    operation_id = "getSong",
    summary = "Get a song by ID",
    params(("id" = i32, Path, description = "Song ID")),
    responses(
        (status = 200, description = "Song details", body = SongResponse),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Song not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn get_song(
    _auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SongResponse>, AppError> {
    let model = find_song(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/songs/{id}",
    tag = "Songs",
    operation_id = "updateSong",
    summary = "Update an existing song",
    description = "Partially updates a song using PATCH semantics. Admin only. Renaming to an existing song name yields 409 SONG_EXISTS.",
    params(("id" = i32, Path, description = "Song ID")),
    request_body = UpdateSongRequest,
    responses(
        (status = 200, description = "Song updated", body = SongResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Song not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Duplicate song name (SONG_EXISTS)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_song(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSongRequest>,
) -> Result<Json<SongResponse>, AppError> {
    auth.require_admin()?;
    validate_update_song(&payload)?;

    if payload == UpdateSongRequest::default() {
        let existing = find_song(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_song(&txn, id).await?;
    let mut active: song::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref artist) = payload.artist {
        active.artist = Set(artist.clone());
    }
    if let Some(ref genre) = payload.genre {
        active.genre = Set(genre.clone());
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(duration);
    }

    let model = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SongExists,
        _ => AppError::from(e),
    })?;
    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/songs/{id}",
    tag = "Songs",
    operation_id = "deleteSong",
    summary = "Delete a song by ID",
    description = "Permanently deletes a song. Admin only. Returns 409 CONFLICT if the song is part of a playlist.",
    params(("id" = i32, Path, description = "Song ID")),
    responses(
        (status = 204, description = "Song deleted"),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Song not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Song is referenced by a playlist (CONFLICT)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_song(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let txn = state.db.begin().await?;

    find_song(&txn, id).await?;

    let ref_count = playlist_item::Entity::find()
        .filter(playlist_item::Column::SongId.eq(id))
        .count(&txn)
        .await?;
    if ref_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete song referenced by a playlist".into(),
        ));
    }

    song::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(StatusCode::NO_CONTENT)
}

async fn find_song<C: ConnectionTrait>(db: &C, id: i32) -> Result<song::Model, AppError> {
    song::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Song not found".into()))
}
