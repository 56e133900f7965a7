use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{api_key, user};
use crate::error::AppError;
use crate::extractors::auth::ApiKeyUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, RotateKeyResponse,
    validate_login_request, validate_register_request,
};
use crate::state::AppState;
use crate::utils::{hash, token};

/// Register a new user and issue their first API key.
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let email = payload.email.trim().to_string();

    let password = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let txn = state.db.begin().await?;

    let new_user = user::ActiveModel {
        email: Set(email),
        password: Set(password),
        height: Set(payload.height),
        weight: Set(payload.weight),
        role: Set(payload.role.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = new_user.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration race: unique constraint caught on insert");
            AppError::EmailTaken
        }
        _ => AppError::from(e),
    })?;

    let raw_key = token::generate();
    let new_key = api_key::ActiveModel {
        digest: Set(token::digest(&raw_key)),
        user_id: Set(created.id),
        admin: Set(created.role == user::ADMIN_ROLE),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    new_key.insert(&txn).await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user_id: created.id,
            api_key: raw_key,
        }),
    ))
}

/// Verify a user's credentials.
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let email = payload.email.trim();

    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No such user in the system".into()))?;

    let is_valid = hash::verify_password(&payload.password, &found.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user_id: found.id,
        email: found.email,
        role: found.role,
    }))
}

/// Replace the caller's API key with a freshly generated one.
#[instrument(skip(state, auth), fields(user_id = auth.user.id))]
pub async fn rotate_key(
    auth: ApiKeyUser,
    State(state): State<AppState>,
) -> Result<Json<RotateKeyResponse>, AppError> {
    let raw_key = token::generate();

    let mut active: api_key::ActiveModel = api_key::Entity::find_by_id(auth.key_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::ApiKeyInvalid)?
        .into();
    active.digest = Set(token::digest(&raw_key));
    active.update(&state.db).await?;

    Ok(Json(RotateKeyResponse {
        message: "API key updated successfully".into(),
        api_key: raw_key,
    }))
}
