//! capcloud library - image caption gallery with a word-cloud view
//!
//! Users upload images, a captioning model service describes each one, and
//! the accumulated captions feed a word-frequency cloud. The gallery lives
//! in memory; image files live on disk under the configured image directory.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod api;
pub mod caption;
pub mod config;
pub mod error;
pub mod gallery;
pub mod wordcloud;

use caption::CaptionClient;
use gallery::{Gallery, GalleryEntry};

/// Largest accepted upload body (matches typical photo sizes with headroom).
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// In-memory gallery, the single store both upload and cloud read from
    pub gallery: Arc<RwLock<Gallery>>,
    /// Client for the caption model service
    pub captioner: Arc<CaptionClient>,
    /// On-disk directory holding gallery images
    pub image_dir: PathBuf,
}

impl AppState {
    /// Create new application state with an empty gallery
    pub fn new(captioner: CaptionClient, image_dir: PathBuf) -> Self {
        Self {
            gallery: Arc::new(RwLock::new(Gallery::new())),
            captioner: Arc::new(captioner),
            image_dir,
        }
    }

    /// Caption every image already present in the image directory and fill
    /// the gallery with the results. Images are captioned concurrently;
    /// failures are logged and skipped so one bad file cannot block startup.
    pub async fn prepare_metadata(&self) -> std::io::Result<()> {
        let mut dir = tokio::fs::read_dir(&self.image_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        let mut tasks = JoinSet::new();
        for name in names {
            let state = self.clone();
            tasks.spawn(async move {
                let path = state.image_dir.join(&name);
                let bytes = match tokio::fs::read(&path).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!("Could not read {}: {}", path.display(), e);
                        return;
                    }
                };
                match state.captioner.predict(&name, bytes).await {
                    Ok(predictions) => {
                        let entry = GalleryEntry {
                            file_name: config::image_url(&name),
                            predictions,
                        };
                        state.gallery.write().await.insert(entry);
                    }
                    Err(e) => warn!("Captioning {} failed: {}", name, e),
                }
            });
        }
        while tasks.join_next().await.is_some() {}

        Ok(())
    }

    /// Delete uploaded images (those carrying the upload prefix) from disk
    /// and drop their gallery entries. Returns the number of files removed.
    pub async fn remove_uploads(&self) -> std::io::Result<usize> {
        let mut dir = tokio::fs::read_dir(&self.image_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(config::UPLOAD_PREFIX) {
                names.push(name);
            }
        }

        let mut gallery = self.gallery.write().await;
        let mut removed = 0;
        for name in names {
            if let Err(e) = tokio::fs::remove_file(self.image_dir.join(&name)).await {
                warn!("Failed to delete {}: {}", name, e);
                continue;
            }
            gallery.remove_with_prefix(&config::image_url(&name));
            removed += 1;
        }

        Ok(removed)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/upload", post(api::upload))
        .route("/detail", get(api::get_detail))
        .route("/cleanup", delete(api::cleanup))
        .route("/api/gallery", get(api::get_gallery))
        .route("/api/wordcloud", get(api::get_wordcloud))
        .route("/api/buildinfo", get(api::get_build_info))
        .nest_service(
            &format!("/{}", config::IMAGE_URL_BASE),
            ServeDir::new(&state.image_dir),
        )
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
