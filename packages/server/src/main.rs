use std::time::Duration;

use tracing::{Level, info};

use server::cache::ResponseCache;
use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = server::database::init_db(&config.database.url).await?;
    server::seed::seed_admin(&db, &config).await?;
    server::seed::ensure_indexes(&db).await?;

    let cache = ResponseCache::new(Duration::from_secs(config.cache.ttl_secs));
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState { db, config, cache };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
