use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row linking a workout plan to a workout, in plan order.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workout_plan_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub workout_plan_id: i32,
    #[sea_orm(belongs_to, from = "workout_plan_id", to = "id")]
    pub workout_plan: HasOne<super::workout_plan::Entity>,

    pub workout_id: i32,
    #[sea_orm(belongs_to, from = "workout_id", to = "id")]
    pub workout: HasOne<super::workout::Entity>,

    #[sea_orm(default_value = 0)]
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
