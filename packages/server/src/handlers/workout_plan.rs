use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::assembly;
use crate::entity::{playlist, playlist_item, workout, workout_plan, workout_plan_item};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::ApiKeyUser;
use crate::extractors::json::AppJson;
use crate::models::workout::WorkoutResponse;
use crate::models::workout_plan::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/workout-plans",
    tag = "Workout Plans",
    operation_id = "createWorkoutPlan",
    summary = "Create a workout plan with a generated playlist",
    description = "Creates a plan from an ordered, non-empty list of workout ids. A playlist named \"<plan_name> Playlist\" is assembled for the plan's intensity profile, and the plan duration is the sum of the workout durations. Every id must exist; otherwise the whole call fails and nothing is stored.",
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Workout plan created", body = CreatePlanResponse),
        (status = 400, description = "Validation error or unknown workout (VALIDATION_ERROR, UNKNOWN_WORKOUT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth, payload), fields(plan_name = %payload.plan_name, user_id = auth.user.id))]
pub async fn create_plan(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_plan(&payload)?;

    let plan_name = payload.plan_name.trim();

    // One transaction around playlist assembly and plan bookkeeping: a
    // failure at any step leaves no partial rows behind.
    let txn = state.db.begin().await?;

    // Song selection is delegated entirely; this handler only does the
    // WorkoutPlan/WorkoutPlanItem bookkeeping and duration summation.
    let outcome =
        assembly::assemble(&txn, &format!("{plan_name} Playlist"), &payload.workout_ids).await?;

    let new_plan = workout_plan::ActiveModel {
        name: Set(plan_name.to_string()),
        user_id: Set(auth.user.id),
        duration: Set(0.0),
        playlist_id: Set(Some(outcome.playlist_id)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let plan = new_plan.insert(&txn).await?;

    let mut total_duration = 0.0_f64;
    for (i, &workout_id) in payload.workout_ids.iter().enumerate() {
        let found = workout::Entity::find_by_id(workout_id)
            .one(&txn)
            .await?
            .ok_or(AppError::UnknownWorkout(workout_id))?;
        total_duration += found.duration;

        let item = workout_plan_item::ActiveModel {
            workout_plan_id: Set(plan.id),
            workout_id: Set(workout_id),
            position: Set(i32::try_from(i)
                .map_err(|_| AppError::Validation("Too many workouts in plan".into()))?),
            ..Default::default()
        };
        item.insert(&txn).await?;
    }

    let plan_id = plan.id;
    let mut active: workout_plan::ActiveModel = plan.into();
    active.duration = Set(total_duration);
    active.update(&txn).await?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok((
        StatusCode::CREATED,
        Json(CreatePlanResponse {
            message: "Workout plan created successfully".into(),
            workout_plan_id: plan_id,
            playlist_id: outcome.playlist_id,
            duration: total_duration,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/workout-plans/{id}",
    tag = "Workout Plans",
    operation_id = "getWorkoutPlan",
    summary = "Get a workout plan with its resolved workouts",
    params(("id" = i32, Path, description = "Workout plan ID")),
    responses(
        (status = 200, description = "Plan details", body = PlanResponse),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Plan not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn get_plan(
    _auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlanResponse>, AppError> {
    let plan = find_plan(&state.db, id).await?;

    let rows = workout_plan_item::Entity::find()
        .filter(workout_plan_item::Column::WorkoutPlanId.eq(id))
        .order_by_asc(workout_plan_item::Column::Position)
        .find_also_related(workout::Entity)
        .all(&state.db)
        .await?;

    let workouts = rows
        .into_iter()
        .filter_map(|(_, maybe_workout)| maybe_workout)
        .map(WorkoutResponse::from)
        .collect();

    Ok(Json(PlanResponse {
        id: plan.id,
        name: plan.name,
        user_id: plan.user_id,
        playlist_id: plan.playlist_id,
        duration: plan.duration,
        workouts,
        created_at: plan.created_at,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/workout-plans",
    tag = "Workout Plans",
    operation_id = "listWorkoutPlansForUser",
    summary = "List a user's workout plans",
    description = "Callable by the user themselves or an admin.",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "List of plans", body = Vec<PlanListItem>),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth), fields(user_id))]
pub async fn list_plans_for_user(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<PlanListItem>>, AppError> {
    auth.require_self_or_admin(user_id)?;

    let rows = workout_plan::Entity::find()
        .filter(workout_plan::Column::UserId.eq(user_id))
        .order_by_asc(workout_plan::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(PlanListItem::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/workout-plans/{id}",
    tag = "Workout Plans",
    operation_id = "updateWorkoutPlan",
    summary = "Rename a workout plan",
    description = "Only the plan name is editable; duration and playlist are derived from the plan's workouts. Owner or admin.",
    params(("id" = i32, Path, description = "Workout plan ID")),
    request_body = UpdatePlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = PlanListItem),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Plan not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_plan(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdatePlanRequest>,
) -> Result<Json<PlanListItem>, AppError> {
    validate_update_plan(&payload)?;

    let existing = find_plan(&state.db, id).await?;
    auth.require_self_or_admin(existing.user_id)?;

    if payload == UpdatePlanRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: workout_plan::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }

    let updated = active.update(&state.db).await?;
    state.cache.invalidate_all();

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/workout-plans/{id}",
    tag = "Workout Plans",
    operation_id = "deleteWorkoutPlan",
    summary = "Delete a workout plan",
    description = "Deletes the plan, its workout links, and the playlist generated for it. Owner or admin.",
    params(("id" = i32, Path, description = "Workout plan ID")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Plan not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_plan(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let plan = find_plan(&txn, id).await?;
    auth.require_self_or_admin(plan.user_id)?;

    delete_plan_cascade(&txn, plan).await?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a plan, its items, and the playlist generated for it. The
/// playlist is a plan-generated artifact with no other owner, so it goes
/// with the plan.
pub(crate) async fn delete_plan_cascade<C: ConnectionTrait>(
    conn: &C,
    plan: workout_plan::Model,
) -> Result<(), AppError> {
    workout_plan_item::Entity::delete_many()
        .filter(workout_plan_item::Column::WorkoutPlanId.eq(plan.id))
        .exec(conn)
        .await?;
    workout_plan::Entity::delete_by_id(plan.id).exec(conn).await?;

    if let Some(playlist_id) = plan.playlist_id {
        playlist_item::Entity::delete_many()
            .filter(playlist_item::Column::PlaylistId.eq(playlist_id))
            .exec(conn)
            .await?;
        playlist::Entity::delete_by_id(playlist_id).exec(conn).await?;
    }

    Ok(())
}

async fn find_plan<C: ConnectionTrait>(db: &C, id: i32) -> Result<workout_plan::Model, AppError> {
    workout_plan::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout plan not found".into()))
}
