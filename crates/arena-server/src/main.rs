mod config;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use arena_api::AppStateInner;
use arena_db::Database;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arena=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // The forum and the tournament keep separate databases
    let forum_db = Database::open(&config.forum_db)?;
    let tournament_db = Database::open(&config.tournament_db)?;
    let state = AppStateInner::new(forum_db, tournament_db);

    let app = arena_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Arena server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
