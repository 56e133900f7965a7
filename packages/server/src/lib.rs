pub mod assembly;
pub mod cache;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::middleware;
use tower_http::cors::{Any, CorsLayer};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cadence API",
        version = "1.0.0",
        description = "Workout, song and workout-plan management with intensity-matched playlist generation"
    ),
    paths(
        handlers::workout::list_workouts,
        handlers::workout::create_workout,
        handlers::workout::get_workout,
        handlers::workout::update_workout,
        handlers::workout::delete_workout,
        handlers::song::list_songs,
        handlers::song::create_song,
        handlers::song::get_song,
        handlers::song::update_song,
        handlers::song::delete_song,
        handlers::playlist::generate_playlist,
        handlers::playlist::get_playlist,
        handlers::playlist::replace_songs,
        handlers::playlist::delete_playlist,
        handlers::workout_plan::create_plan,
        handlers::workout_plan::get_plan,
        handlers::workout_plan::list_plans_for_user,
        handlers::workout_plan::update_plan,
        handlers::workout_plan::delete_plan,
    ),
    tags(
        (name = "Workouts", description = "Workout CRUD operations"),
        (name = "Songs", description = "Song catalog operations"),
        (name = "Playlists", description = "Playlist assembly and management"),
        (name = "Workout Plans", description = "Workout plans with generated playlists"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = routes::api_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        cache::cache_responses,
    ));

    let cors = cors_layer(&state.config);

    axum::Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.server.cors.max_age));

    let origins: Vec<HeaderValue> = config
        .server
        .cors
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}
