use axum::{routing::get, Router};
use meshstore_peer::NodeConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::handlers::{get_file, get_info, get_local, post_file, AppState};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/info", get(get_info))
        .route("/from_node/:file_name", get(get_local))
        .route("/:file_name", get(get_file).post(post_file))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: NodeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_config(&config)?;
    let bind_addr = config.bind_addr();

    if config.neighbors.is_empty() {
        tracing::info!("Fallback disabled (no neighbors configured)");
    } else {
        tracing::info!(
            "Fallback enabled: {} neighbors {:?}, peer timeout {}s",
            config.neighbors.len(),
            config.neighbors,
            config.peer_timeout_secs
        );
    }
    if config.save_file {
        tracing::info!("Caching of peer-fetched files enabled");
    }

    let app = router(state);

    tracing::info!(
        "Starting meshstore node on {} serving {}",
        bind_addr,
        config.directory.display()
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
