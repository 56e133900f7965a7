use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{workout, workout_plan_item};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::ApiKeyUser;
use crate::extractors::json::AppJson;
use crate::models::workout::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/workouts",
    tag = "Workouts",
    operation_id = "listWorkouts",
    summary = "List all workouts",
    responses(
        (status = 200, description = "List of workouts", body = Vec<WorkoutResponse>),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _auth))]
pub async fn list_workouts(
    _auth: ApiKeyUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkoutResponse>>, AppError> {
    let rows = workout::Entity::find()
        .order_by_asc(workout::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(WorkoutResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/workouts",
    tag = "Workouts",
    operation_id = "createWorkout",
    summary = "Create a new workout",
    description = "Creates a new workout. Admin only. The intensity must be one of the five known levels.",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth, payload), fields(name = %payload.name))]
pub async fn create_workout(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateWorkoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    validate_create_workout(&payload)?;

    let new_workout = workout::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        duration: Set(payload.duration),
        intensity: Set(payload.intensity),
        equipment: Set(payload.equipment),
        kind: Set(payload.kind),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_workout.insert(&state.db).await?;
    state.cache.invalidate_all();

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/workouts/{id}",
    tag = "Workouts",
    operation_id = "getWorkout",
    summary = "Get a workout by ID",
    params(("id" = i32, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Workout details", body = WorkoutResponse),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Workout not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn get_workout(
    _auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<WorkoutResponse>, AppError> {
    let model = find_workout(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/workouts/{id}",
    tag = "Workouts",
    operation_id = "updateWorkout",
    summary = "Update an existing workout",
    description = "Partially updates a workout using PATCH semantics — only provided fields are modified. Admin only.",
    params(("id" = i32, Path, description = "Workout ID")),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated", body = WorkoutResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workout not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_workout(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateWorkoutRequest>,
) -> Result<Json<WorkoutResponse>, AppError> {
    auth.require_admin()?;
    validate_update_workout(&payload)?;

    if payload == UpdateWorkoutRequest::default() {
        let existing = find_workout(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_workout(&txn, id).await?;
    let mut active: workout::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(duration);
    }
    if let Some(ref intensity) = payload.intensity {
        active.intensity = Set(intensity.clone());
    }
    if let Some(ref equipment) = payload.equipment {
        active.equipment = Set(equipment.clone());
    }
    if let Some(ref kind) = payload.kind {
        active.kind = Set(kind.clone());
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/workouts/{id}",
    tag = "Workouts",
    operation_id = "deleteWorkout",
    summary = "Delete a workout by ID",
    description = "Permanently deletes a workout. Admin only. Returns 409 CONFLICT if the workout is part of a workout plan.",
    params(("id" = i32, Path, description = "Workout ID")),
    responses(
        (status = 204, description = "Workout deleted"),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workout not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Workout is referenced by a plan (CONFLICT)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_workout(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let txn = state.db.begin().await?;

    find_workout(&txn, id).await?;

    let ref_count = workout_plan_item::Entity::find()
        .filter(workout_plan_item::Column::WorkoutId.eq(id))
        .count(&txn)
        .await?;
    if ref_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete workout referenced by a workout plan".into(),
        ));
    }

    workout::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(StatusCode::NO_CONTENT)
}

async fn find_workout<C: ConnectionTrait>(db: &C, id: i32) -> Result<workout::Model, AppError> {
    workout::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".into()))
}
