pub mod auth;
pub mod playlist;
pub mod shared;
pub mod song;
pub mod user;
pub mod workout;
pub mod workout_plan;
