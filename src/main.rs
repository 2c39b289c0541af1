use anyhow::{Context, Result};
use jspace_content::api::{self, AppState};
use jspace_content::config::Config;
use jspace_content::db::Database;
use jspace_content::translation::provider_from_config;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jspace_content=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting J/Space content service");

    // Load configuration from environment
    let config = Config::from_env()?;

    let db = Database::new(&config.database_url).await?;
    db.health_check().await?;
    info!("✓ Database connected");

    let provider = provider_from_config(&config)?;
    info!("Translation model: {}", config.openai_model);

    let app = api::router(AppState { db, provider }).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
