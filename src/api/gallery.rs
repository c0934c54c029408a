//! Gallery listing, per-image detail, and cleanup endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::gallery::Prediction;
use crate::AppState;

/// One gallery image as listed on the index page
#[derive(Debug, Serialize)]
pub struct GalleryImage {
    pub file_name: String,
    pub caption: String,
}

/// Gallery listing response
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub images: Vec<GalleryImage>,
}

/// GET /api/gallery
///
/// Current gallery in sorted order, used for the initial page render.
pub async fn get_gallery(State(state): State<AppState>) -> Json<GalleryResponse> {
    let gallery = state.gallery.read().await;
    let images = gallery
        .entries()
        .iter()
        .map(|entry| GalleryImage {
            file_name: entry.file_name.clone(),
            caption: entry.caption().to_string(),
        })
        .collect();
    Json(GalleryResponse { images })
}

/// Query parameters for the detail endpoint
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub image: Option<String>,
}

/// Per-image detail response: every prediction the model returned
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub file_name: String,
    pub predictions: Vec<Prediction>,
}

/// GET /detail?image=<file_name>
pub async fn get_detail(
    State(state): State<AppState>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<DetailResponse>> {
    let image = query
        .image
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing image parameter".to_string()))?;

    let gallery = state.gallery.read().await;
    let entry = gallery
        .get(&image)
        .ok_or_else(|| ApiError::NotFound("Image not found".to_string()))?;

    Ok(Json(DetailResponse {
        file_name: entry.file_name.clone(),
        predictions: entry.predictions.clone(),
    }))
}

/// Cleanup response
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub removed: usize,
}

/// DELETE /cleanup
///
/// Deletes all images uploaded through the web UI and drops their gallery
/// entries. Pre-seeded images are untouched.
pub async fn cleanup(State(state): State<AppState>) -> Result<Json<CleanupResponse>> {
    let removed = state.remove_uploads().await?;
    info!("Cleanup removed {} uploaded image(s)", removed);
    Ok(Json(CleanupResponse { removed }))
}
