use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "playlist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// Sum of the constituent song durations at assembly time.
    pub total_duration: f64,

    #[sea_orm(has_many)]
    pub items: HasMany<super::playlist_item::Entity>,

    #[sea_orm(has_many)]
    pub workout_plans: HasMany<super::workout_plan::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
