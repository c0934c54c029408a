//! capcloud - image caption gallery web app
//!
//! Serves the gallery UI, forwards uploads to the caption model service,
//! and computes the word-cloud data from accumulated captions.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tokio::signal;
use tracing::{error, info};

use capcloud::caption::CaptionClient;
use capcloud::config::Args;
use capcloud::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting capcloud v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let predict_url = args.predict_url();
    info!("Connecting to caption model endpoint at {}", predict_url);

    let captioner = CaptionClient::new(predict_url)?;
    if let Err(e) = captioner.check().await {
        error!(
            "Cannot connect to the caption model REST endpoint at {}: {}",
            args.ml_endpoint, e
        );
        anyhow::bail!("caption model endpoint unreachable");
    }

    tokio::fs::create_dir_all(&args.image_dir)
        .await
        .with_context(|| format!("Failed to create image directory {}", args.image_dir.display()))?;
    info!("Image directory: {}", args.image_dir.display());

    let state = AppState::new(captioner, args.image_dir.clone());

    // Caption all pre-seeded images before accepting traffic
    info!("Preparing caption metadata");
    let start = Instant::now();
    state
        .prepare_metadata()
        .await
        .context("Failed to scan image directory")?;
    info!(
        "Metadata prepared in {:.2?} ({} image(s))",
        start.elapsed(),
        state.gallery.read().await.len()
    );

    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port))
        .await
        .context("Failed to bind to address")?;
    info!("capcloud listening on http://127.0.0.1:{}", args.port);
    info!("Use Ctrl+C to stop web server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Mirror of DELETE /cleanup: uploaded images do not outlive the server
    info!("Cleaning up uploaded image files");
    match state.remove_uploads().await {
        Ok(removed) => info!("Removed {} uploaded image(s)", removed),
        Err(e) => error!("Cleanup failed: {}", e),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
