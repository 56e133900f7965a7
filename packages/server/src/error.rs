use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::policy::UnknownIntensity;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `UNKNOWN_WORKOUT`, `API_KEY_MISSING`, `API_KEY_INVALID`,
    /// `INVALID_CREDENTIALS`, `PERMISSION_DENIED`, `NOT_FOUND`, `CONFLICT`,
    /// `EMAIL_TAKEN`, `SONG_EXISTS`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "plan_name must be 1-64 characters")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// A workout id referenced by a plan does not exist. The whole plan
    /// creation fails and rolls back.
    UnknownWorkout(i32),
    ApiKeyMissing,
    ApiKeyInvalid,
    InvalidCredentials,
    PermissionDenied,
    NotFound(String),
    Conflict(String),
    EmailTaken,
    SongExists,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::UnknownWorkout(id) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "UNKNOWN_WORKOUT",
                    message: format!("Workout {} does not exist", id),
                },
            ),
            AppError::ApiKeyMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "API_KEY_MISSING",
                    message: "X-API-Key header is required".into(),
                },
            ),
            AppError::ApiKeyInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "API_KEY_INVALID",
                    message: "Invalid API key".into(),
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid email or password".into(),
                },
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "PERMISSION_DENIED",
                    message: "Insufficient permissions".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "EMAIL_TAKEN",
                    message: "Email is already registered".into(),
                },
            ),
            AppError::SongExists => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "SONG_EXISTS",
                    message: "A song with this name already exists".into(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<UnknownIntensity> for AppError {
    fn from(err: UnknownIntensity) -> Self {
        AppError::Validation(err.to_string())
    }
}
