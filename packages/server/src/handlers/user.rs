use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{api_key, user, workout_plan};
use crate::error::AppError;
use crate::extractors::auth::ApiKeyUser;
use crate::extractors::json::AppJson;
use crate::handlers::workout_plan::delete_plan_cascade;
use crate::models::user::{UpdateUserRequest, UserResponse, validate_update_user};
use crate::state::AppState;
use crate::utils::hash;

#[instrument(skip(state, auth), fields(id))]
pub async fn get_user(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    auth.require_self_or_admin(id)?;

    let found = find_user(&state.db, id).await?;
    Ok(Json(found.into()))
}

#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_user(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    auth.require_self_or_admin(id)?;
    validate_update_user(&payload)?;

    // Promoting or demoting an account is an admin-only act, even on self.
    if payload.role.is_some() {
        auth.require_admin()?;
    }

    if payload == UpdateUserRequest::default() {
        let existing = find_user(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_user(&txn, id).await?;
    let mut active: user::ActiveModel = existing.into();

    if let Some(ref email) = payload.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(ref password) = payload.password {
        let hashed = hash::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        active.password = Set(hashed);
    }
    if let Some(height) = payload.height {
        active.height = Set(height);
    }
    if let Some(weight) = payload.weight {
        active.weight = Set(weight);
    }
    if let Some(ref role) = payload.role {
        active.role = Set(role.clone());
        // Keep the cached role flag on the user's keys in step.
        api_key::Entity::update_many()
            .filter(api_key::Column::UserId.eq(id))
            .col_expr(
                api_key::Column::Admin,
                sea_orm::prelude::Expr::value(role == user::ADMIN_ROLE),
            )
            .exec(&txn)
            .await?;
    }

    let updated = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
        _ => AppError::from(e),
    })?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(Json(updated.into()))
}

/// Delete a user together with everything they own: API keys, workout
/// plans, and the playlists those plans generated.
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_user(
    auth: ApiKeyUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let txn = state.db.begin().await?;

    find_user(&txn, id).await?;

    let plans = workout_plan::Entity::find()
        .filter(workout_plan::Column::UserId.eq(id))
        .all(&txn)
        .await?;
    for plan in plans {
        delete_plan_cascade(&txn, plan).await?;
    }

    api_key::Entity::delete_many()
        .filter(api_key::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    user::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    state.cache.invalidate_all();

    Ok(StatusCode::NO_CONTENT)
}

async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}
