mod config;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use guestbook_api::{AppState, AppStateInner};
use guestbook_db::Database;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str =
    "guestbook_server=debug,guestbook_api=debug,guestbook_db=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database (creates tables on first run)
    let db = Database::open(&config.db)?;
    let state: AppState = Arc::new(AppStateInner { db });

    let app = guestbook_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Guestbook listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
