use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::config::AppConfig;
use crate::entity::{api_key, playlist_item, song, user};
use crate::utils::{hash, token};

/// Create the bootstrap admin account on first startup, if configured and
/// not already present. The generated API key is logged once; rotate it
/// via `PUT /api/v1/auth/keys` after noting it down.
pub async fn seed_admin(db: &DatabaseConnection, config: &AppConfig) -> anyhow::Result<()> {
    let Some(bootstrap) = &config.bootstrap else {
        return Ok(());
    };

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(&bootstrap.admin_email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password = hash::hash_password(&bootstrap.admin_password)?;

    let admin = user::ActiveModel {
        email: Set(bootstrap.admin_email.clone()),
        password: Set(password),
        height: Set(170.0),
        weight: Set(70.0),
        role: Set(user::ADMIN_ROLE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let raw_key = token::generate();
    api_key::ActiveModel {
        digest: Set(token::digest(&raw_key)),
        user_id: Set(admin.id),
        admin: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Seeded bootstrap admin '{}' with API key {}",
        bootstrap.admin_email, raw_key
    );

    Ok(())
}

/// Ensure required database indexes exist.
///
/// Schema sync creates tables and unique constraints from the entities;
/// plain lookup indexes are created manually here.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Genre lookups drive playlist assembly:
    // SELECT id, duration FROM song WHERE genre IN (...) ORDER BY id
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_song_genre")
        .table(song::Entity)
        .col(song::Column::Genre)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_song_genre exists");

    // Playlist contents are always read in (playlist_id, position) order.
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_playlist_item_playlist_position")
        .table(playlist_item::Entity)
        .col(playlist_item::Column::PlaylistId)
        .col(playlist_item::Column::Position)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_playlist_item_playlist_position exists");

    Ok(())
}
