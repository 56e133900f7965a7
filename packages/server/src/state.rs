use sea_orm::DatabaseConnection;

use crate::cache::ResponseCache;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub cache: ResponseCache,
}
