//! YieldLens API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use yieldlens_common::config::AppConfig;

use yieldlens_api::routes::create_router;
use yieldlens_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("yieldlens_api=debug,yieldlens_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting YieldLens API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    tracing::info!(
        rpc_url = %config.arbitrum_rpc_url,
        reward_tracker = %config.reward_tracker_address,
        reward_distributor = %config.reward_distributor_address,
        progress_webhook = config.progress_webhook_url.is_some(),
        "Configuration loaded"
    );

    // Build application state
    let state = AppState::new(config);
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.api_port));

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    tracing::info!("YieldLens API server stopped.");
    Ok(())
}
