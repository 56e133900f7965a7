use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_duration, validate_name};
use crate::error::AppError;
use crate::policy::Intensity;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateWorkoutRequest {
    pub name: String,
    /// Workout length in seconds.
    pub duration: f64,
    /// One of: `slow`, `mild`, `intermediate`, `fast`, `extreme`.
    pub intensity: String,
    pub equipment: String,
    pub kind: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateWorkoutRequest {
    pub name: Option<String>,
    pub duration: Option<f64>,
    pub intensity: Option<String>,
    pub equipment: Option<String>,
    pub kind: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkoutResponse {
    pub id: i32,
    pub name: String,
    pub duration: f64,
    pub intensity: String,
    pub equipment: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::workout::Model> for WorkoutResponse {
    fn from(m: crate::entity::workout::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            duration: m.duration,
            intensity: m.intensity,
            equipment: m.equipment,
            kind: m.kind,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_workout(req: &CreateWorkoutRequest) -> Result<(), AppError> {
    validate_name(&req.name, "name")?;
    validate_duration(req.duration, "duration")?;
    req.intensity.parse::<Intensity>()?;
    validate_name(&req.equipment, "equipment")?;
    validate_name(&req.kind, "kind")?;
    Ok(())
}

pub fn validate_update_workout(req: &UpdateWorkoutRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "name")?;
    }
    if let Some(duration) = req.duration {
        validate_duration(duration, "duration")?;
    }
    if let Some(ref intensity) = req.intensity {
        intensity.parse::<Intensity>()?;
    }
    if let Some(ref equipment) = req.equipment {
        validate_name(equipment, "equipment")?;
    }
    if let Some(ref kind) = req.kind {
        validate_name(kind, "kind")?;
    }
    Ok(())
}
