use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_duration, validate_name};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSongRequest {
    pub name: String,
    pub artist: String,
    pub genre: String,
    /// Song length in seconds.
    pub duration: f64,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateSongRequest {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<f64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SongResponse {
    pub id: i32,
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub duration: f64,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::song::Model> for SongResponse {
    fn from(m: crate::entity::song::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            artist: m.artist,
            genre: m.genre,
            duration: m.duration,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_song(req: &CreateSongRequest) -> Result<(), AppError> {
    validate_name(&req.name, "name")?;
    validate_name(&req.artist, "artist")?;
    validate_name(&req.genre, "genre")?;
    validate_duration(req.duration, "duration")?;
    Ok(())
}

pub fn validate_update_song(req: &UpdateSongRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "name")?;
    }
    if let Some(ref artist) = req.artist {
        validate_name(artist, "artist")?;
    }
    if let Some(ref genre) = req.genre {
        validate_name(genre, "genre")?;
    }
    if let Some(duration) = req.duration {
        validate_duration(duration, "duration")?;
    }
    Ok(())
}
