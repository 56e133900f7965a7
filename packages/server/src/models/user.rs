use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_email, validate_measurement, validate_password, validate_role};
use crate::error::AppError;

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub height: f64,
    pub weight: f64,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Default, PartialEq)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    /// Changing the role requires admin.
    pub role: Option<String>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            height: m.height,
            weight: m.weight,
            role: m.role,
            created_at: m.created_at,
        }
    }
}

pub fn validate_update_user(req: &UpdateUserRequest) -> Result<(), AppError> {
    if let Some(ref email) = req.email {
        validate_email(email)?;
    }
    if let Some(ref password) = req.password {
        validate_password(password)?;
    }
    if let Some(height) = req.height {
        validate_measurement(height, "height")?;
    }
    if let Some(weight) = req.weight {
        validate_measurement(weight, "weight")?;
    }
    if let Some(ref role) = req.role {
        validate_role(role)?;
    }
    Ok(())
}
