mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use sensei_ai::AiGateway;
use sensei_api::auth::{AppState, AppStateInner};
use sensei_api::routes::router;
use sensei_gateway::Dispatcher;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensei=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.ai.api_key.is_empty() {
        warn!("No model API key configured; translation and quiz generation will return fallbacks");
    }

    // Init database
    let db = sensei_db::Database::open(&config.db_path)?;

    // Shared state
    let app_state: AppState = Arc::new(AppStateInner {
        db,
        ai: AiGateway::gemini(config.ai.clone()),
        dispatcher: Dispatcher::new(),
    });

    let app = router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_addr().parse()?;
    info!("Sensei server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
