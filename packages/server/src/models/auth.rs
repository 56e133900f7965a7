use serde::{Deserialize, Serialize};

use super::shared::{validate_email, validate_measurement, validate_password, validate_role};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub height: f64,
    pub weight: f64,
    pub role: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
    /// The raw API key, shown exactly once. Only its digest is stored.
    pub api_key: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i32,
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
pub struct RotateKeyResponse {
    pub message: String,
    /// The replacement API key; the previous key stops working immediately.
    pub api_key: String,
}

pub fn validate_register_request(req: &RegisterRequest) -> Result<(), AppError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_measurement(req.height, "height")?;
    validate_measurement(req.weight, "weight")?;
    validate_role(&req.role)?;
    Ok(())
}

pub fn validate_login_request(req: &LoginRequest) -> Result<(), AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }
    Ok(())
}
