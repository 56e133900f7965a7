use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_name;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct GeneratePlaylistRequest {
    pub playlist_name: String,
    /// Ordered workout ids to cover. May be empty (yields an empty
    /// playlist); unknown ids are skipped and reported.
    pub workout_ids: Vec<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct GeneratePlaylistResponse {
    pub message: String,
    pub playlist_id: i32,
    pub total_duration: f64,
    pub song_count: usize,
    /// Workout ids that contributed nothing to the playlist.
    pub skipped_workout_ids: Vec<i32>,
}

/// One song within a playlist detail response, in play order.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PlaylistSong {
    pub id: i32,
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub duration: f64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PlaylistResponse {
    pub id: i32,
    pub name: String,
    pub total_duration: f64,
    pub songs: Vec<PlaylistSong>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReplaceSongsRequest {
    /// Replacement contents in play order. Every id must be an existing
    /// song; the same song may appear more than once.
    pub song_ids: Vec<i32>,
}

pub fn validate_generate_playlist(req: &GeneratePlaylistRequest) -> Result<(), AppError> {
    validate_name(&req.playlist_name, "playlist_name")?;
    Ok(())
}
