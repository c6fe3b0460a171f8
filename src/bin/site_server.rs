// Site server binary entry point
//
// Purpose: Start the Axum server rendering the content site
// Usage: SERVER_URL=... CHANNEL_TOKEN=... cargo run --bin site_server

use content_site::{create_router, AppState, SiteConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "content_site=info,tower_http=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting site server...");

    let config = SiteConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  SERVER_URL: {}", config.client.server_url);
    tracing::info!("  CONTENT_MODE: {:?}", config.client.mode);
    tracing::info!("  API_VERSION: {}", config.client.api_version);
    tracing::info!("  PUBLIC_DIR: {}", config.public_dir);
    tracing::info!("  PORT: {}", config.port);

    let state = AppState::new(&config)?;

    // Create router with all endpoints and middleware
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
