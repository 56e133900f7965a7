use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/workouts", workout_routes())
        .nest("/songs", song_routes())
        .nest("/playlists", playlist_routes())
        .nest("/workout-plans", workout_plan_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/keys", put(handlers::auth::rotate_key))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(handlers::user::get_user)
                .patch(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route(
            "/{id}/workout-plans",
            get(handlers::workout_plan::list_plans_for_user),
        )
}

fn workout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::workout::list_workouts).post(handlers::workout::create_workout),
        )
        .route(
            "/{id}",
            get(handlers::workout::get_workout)
                .patch(handlers::workout::update_workout)
                .delete(handlers::workout::delete_workout),
        )
}

fn song_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::song::list_songs).post(handlers::song::create_song),
        )
        .route(
            "/{id}",
            get(handlers::song::get_song)
                .patch(handlers::song::update_song)
                .delete(handlers::song::delete_song),
        )
}

fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(handlers::playlist::generate_playlist))
        .route(
            "/{id}",
            get(handlers::playlist::get_playlist).delete(handlers::playlist::delete_playlist),
        )
        .route("/{id}/songs", put(handlers::playlist::replace_songs))
}

fn workout_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::workout_plan::create_plan))
        .route(
            "/{id}",
            get(handlers::workout_plan::get_plan)
                .patch(handlers::workout_plan::update_plan)
                .delete(handlers::workout_plan::delete_plan),
        )
}
