//! Span Annotator Server
//!
//! Serves the annotator page and the session API, and reaps idle sessions
//! in the background.

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use span_annotator_server::{app, config::Config, state::AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "span_annotator_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting Span Annotator Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Output path: {}", config.annotator.output_path.display());
    tracing::info!("Seed labels: {}", config.annotator.seed_labels.join(", "));

    // Create application state
    let state = AppState::new(config);

    // Reap idle sessions in the background
    let _cleanup = state.sessions().clone().start_cleanup_task();

    let addr: SocketAddr = format!(
        "{}:{}",
        state.config().server.host,
        state.config().server.port
    )
    .parse()
    .expect("invalid server address");

    let app = app(state);

    // Start server with graceful shutdown
    tracing::info!("Span Annotator Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
