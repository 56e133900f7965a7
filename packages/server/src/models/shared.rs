use crate::entity::user::{ADMIN_ROLE, STANDARD_ROLE};
use crate::error::AppError;

/// Validate a trimmed name-like field (1-64 Unicode characters).
pub fn validate_name(value: &str, field: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 64 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-64 characters"
        )));
    }
    Ok(())
}

/// Validate a duration in seconds (finite, strictly positive).
pub fn validate_duration(seconds: f64, field: &str) -> Result<(), AppError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be a positive number of seconds"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.len() < 3 || email.len() > 254 || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 || password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), AppError> {
    if role != ADMIN_ROLE && role != STANDARD_ROLE {
        return Err(AppError::Validation(format!(
            "Role must be one of: {ADMIN_ROLE}, {STANDARD_ROLE}"
        )));
    }
    Ok(())
}

/// Validate a positive body measurement (height/weight).
pub fn validate_measurement(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(())
}
