use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role assigned to newly registered users unless they ask for `admin`.
pub const STANDARD_ROLE: &str = "standard";
pub const ADMIN_ROLE: &str = "admin";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 password hash, never the raw password.
    pub password: String,
    pub height: f64, // in centimeters
    pub weight: f64, // in kilograms
    /// One of: `admin`, `standard`.
    pub role: String,

    #[sea_orm(has_many)]
    pub api_keys: HasMany<super::api_key::Entity>,

    #[sea_orm(has_many)]
    pub workout_plans: HasMany<super::workout_plan::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
