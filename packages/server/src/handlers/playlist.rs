use std::collections::{HashMap, HashSet};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::assembly;
use crate::entity::{playlist, playlist_item, song, workout_plan};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::ApiKeyUser;
use crate::extractors::json::AppJson;
use crate::models::playlist::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/playlists/generate",
    tag = "Playlists",
    operation_id = "generatePlaylist",
    summary = "Assemble a playlist for a list of workouts",
    description = "Selects songs per workout by intensity-matched genre and a greedy duration fill, and persists them as one playlist. Unknown workout ids are skipped and reported in `skipped_workout_ids`. An empty `workout_ids` list yields an empty playlist.",
    request_body = GeneratePlaylistRequest,
    responses(
        (status = 201, description = "Playlist created", body = GeneratePlaylistResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(playlist_name = %payload.playlist_name))]
pub async fn generate_playlist(
    _auth: ApiKeyUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<GeneratePlaylistRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_generate_playlist(&payload)?;

    let txn = state.db.begin().await?;
    let outcome = assembly::assemble(&txn, payload.playlist_name.trim(), &payload.workout_ids).await?;
    txn.commit().await?;
    state.cache.invalidate_all();

    Ok((
        StatusCode::CREATED,
        Json(GeneratePlaylistResponse {
            message: "Playlist created successfully".into(),
            playlist_id: outcome.playlist_id,
            total_duration: outcome.total_duration,
            song_count: outcome.song_count,
            skipped_workout_ids: outcome.skipped_workout_ids,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/playlists/{id}",
    tag = "Playlists",
    operation_id = "getPlaylist",
    summary = "Get a playlist with its songs in play order",
    params(("id" = i32, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "Playlist details", body = PlaylistResponse),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Playlist not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn get_playlist(
    _auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlaylistResponse>, AppError> {
    let found = find_playlist(&state.db, id).await?;

    let rows = playlist_item::Entity::find()
        .filter(playlist_item::Column::PlaylistId.eq(id))
        .order_by_asc(playlist_item::Column::Position)
        .find_also_related(song::Entity)
        .all(&state.db)
        .await?;

    let songs = rows
        .into_iter()
        .filter_map(|(_, maybe_song)| maybe_song)
        .map(|s| PlaylistSong {
            id: s.id,
            name: s.name,
            artist: s.artist,
            genre: s.genre,
            duration: s.duration,
        })
        .collect();

    Ok(Json(PlaylistResponse {
        id: found.id,
        name: found.name,
        total_duration: found.total_duration,
        songs,
        created_at: found.created_at,
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/playlists/{id}/songs",
    tag = "Playlists",
    operation_id = "replacePlaylistSongs",
    summary = "Replace a playlist's songs and order",
    description = "Replaces the playlist contents with the given song ids, in order. Admin only. Every id must refer to an existing song; the total duration is recomputed.",
    params(("id" = i32, Path, description = "Playlist ID")),
    request_body = ReplaceSongsRequest,
    responses(
        (status = 204, description = "Playlist contents replaced"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Playlist not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn replace_songs(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ReplaceSongsRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let txn = state.db.begin().await?;

    let existing = find_playlist(&txn, id).await?;

    let unique_ids: HashSet<i32> = payload.song_ids.iter().copied().collect();
    let found = song::Entity::find()
        .filter(song::Column::Id.is_in(unique_ids.iter().copied()))
        .all(&txn)
        .await?;
    let duration_by_id: HashMap<i32, f64> = found.iter().map(|s| (s.id, s.duration)).collect();

    for &song_id in &payload.song_ids {
        if !duration_by_id.contains_key(&song_id) {
            return Err(AppError::Validation(format!(
                "Unknown song id {} in song_ids",
                song_id
            )));
        }
    }

    playlist_item::Entity::delete_many()
        .filter(playlist_item::Column::PlaylistId.eq(id))
        .exec(&txn)
        .await?;

    let mut total = 0.0_f64;
    for (i, &song_id) in payload.song_ids.iter().enumerate() {
        total += duration_by_id[&song_id];
        let item = playlist_item::ActiveModel {
            playlist_id: Set(id),
            song_id: Set(song_id),
            position: Set(i32::try_from(i)
                .map_err(|_| AppError::Validation("Too many songs in playlist".into()))?),
            ..Default::default()
        };
        item.insert(&txn).await?;
    }

    let mut active: playlist::ActiveModel = existing.into();
    active.total_duration = Set(total);
    active.update(&txn).await?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/playlists/{id}",
    tag = "Playlists",
    operation_id = "deletePlaylist",
    summary = "Delete a playlist and its items",
    description = "Admin only. A playlist still owned by a workout plan cannot be deleted directly; delete the plan instead (which removes its playlist).",
    params(("id" = i32, Path, description = "Playlist ID")),
    responses(
        (status = 204, description = "Playlist deleted"),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Playlist not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Playlist belongs to a workout plan (CONFLICT)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_playlist(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let txn = state.db.begin().await?;

    find_playlist(&txn, id).await?;

    let owner_count = workout_plan::Entity::find()
        .filter(workout_plan::Column::PlaylistId.eq(id))
        .count(&txn)
        .await?;
    if owner_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete playlist owned by a workout plan".into(),
        ));
    }

    playlist_item::Entity::delete_many()
        .filter(playlist_item::Column::PlaylistId.eq(id))
        .exec(&txn)
        .await?;
    playlist::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(StatusCode::NO_CONTENT)
}

async fn find_playlist<C: ConnectionTrait>(db: &C, id: i32) -> Result<playlist::Model, AppError> {
    playlist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".into()))
}
