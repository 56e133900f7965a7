use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workout")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub duration: f64, // in seconds
    /// One of the five intensity levels; validated at the request boundary,
    /// parsed again (fail-closed) by the genre policy.
    pub intensity: String,
    pub equipment: String,
    pub kind: String,

    #[sea_orm(has_many)]
    pub plan_items: HasMany<super::workout_plan_item::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
