use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_name;
use super::workout::WorkoutResponse;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePlanRequest {
    pub plan_name: String,
    /// Ordered workout ids making up the plan. Must be non-empty; every id
    /// must refer to an existing workout.
    pub workout_ids: Vec<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreatePlanResponse {
    pub message: String,
    pub workout_plan_id: i32,
    pub playlist_id: i32,
    /// Sum of the constituent workout durations, in seconds.
    pub duration: f64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PlanResponse {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
    pub playlist_id: Option<i32>,
    pub duration: f64,
    /// Constituent workouts in plan order.
    pub workouts: Vec<WorkoutResponse>,
    pub created_at: DateTime<Utc>,
}

/// Summary row for per-user plan listings.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PlanListItem {
    pub id: i32,
    pub name: String,
    pub playlist_id: Option<i32>,
    pub duration: f64,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::workout_plan::Model> for PlanListItem {
    fn from(m: crate::entity::workout_plan::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            playlist_id: m.playlist_id,
            duration: m.duration,
            created_at: m.created_at,
        }
    }
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdatePlanRequest {
    /// The only editable field; duration and playlist are derived.
    pub name: Option<String>,
}

pub fn validate_create_plan(req: &CreatePlanRequest) -> Result<(), AppError> {
    validate_name(&req.plan_name, "plan_name")?;
    if req.workout_ids.is_empty() {
        return Err(AppError::Validation("workout_ids must not be empty".into()));
    }
    Ok(())
}

pub fn validate_update_plan(req: &UpdatePlanRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "name")?;
    }
    Ok(())
}
