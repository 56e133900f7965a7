use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::*;

use crate::entity::{api_key, user};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::token;

/// Authenticated caller resolved from the `X-API-Key` header.
///
/// Add this as a handler parameter to require authentication. Role checks
/// happen via `require_admin()` / `require_self_or_admin()` in the handler
/// body.
pub struct ApiKeyUser {
    pub user: user::Model,
    pub key_id: i32,
    pub is_admin: bool,
}

impl ApiKeyUser {
    /// Returns `Ok(())` if the caller has the admin role.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Returns `Ok(())` if the caller is the given user, or an admin.
    pub fn require_self_or_admin(&self, user_id: i32) -> Result<(), AppError> {
        if self.is_admin || self.user.id == user_id {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl FromRequestParts<AppState> for ApiKeyUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_key = parts
            .headers
            .get("X-API-Key")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::ApiKeyMissing)?;

        let stored = api_key::Entity::find()
            .filter(api_key::Column::Digest.eq(token::digest(raw_key)))
            .one(&state.db)
            .await?
            .ok_or(AppError::ApiKeyInvalid)?;

        // A key whose user vanished is as good as no key.
        let user = user::Entity::find_by_id(stored.user_id)
            .one(&state.db)
            .await?
            .ok_or(AppError::ApiKeyInvalid)?;

        Ok(ApiKeyUser {
            user,
            key_id: stored.id,
            is_admin: stored.admin,
        })
    }
}
