use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row linking a playlist to a song. `position` is the selection
/// order; the same song may appear more than once per playlist.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "playlist_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub playlist_id: i32,
    #[sea_orm(belongs_to, from = "playlist_id", to = "id")]
    pub playlist: HasOne<super::playlist::Entity>,

    pub song_id: i32,
    #[sea_orm(belongs_to, from = "song_id", to = "id")]
    pub song: HasOne<super::song::Entity>,

    #[sea_orm(default_value = 0)]
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
