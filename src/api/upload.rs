//! Image upload endpoint
//!
//! Accepts a multipart form with one or more `file` parts. Each file is
//! written to the image directory under the upload prefix, captioned by the
//! model service, and inserted into the gallery. The response is a JSON
//! array with one `{file_name, caption}` element per uploaded file, which
//! the browser turns into prepended thumbnails.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::config::{image_url, UPLOAD_PREFIX};
use crate::error::{ApiError, Result};
use crate::gallery::GalleryEntry;
use crate::AppState;

/// One uploaded file's outcome
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub file_name: String,
    pub caption: String,
}

/// POST /upload
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<UploadResult>>> {
    let mut uploaded = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let file_name = format!("{}{}", UPLOAD_PREFIX, original_name);
        let disk_path = state.image_dir.join(&file_name);
        tokio::fs::write(&disk_path, &bytes).await?;

        let predictions = state.captioner.predict(&file_name, bytes.to_vec()).await?;

        let entry = GalleryEntry {
            file_name: image_url(&file_name),
            predictions,
        };
        info!("Uploaded {} -> \"{}\"", entry.file_name, entry.caption());
        uploaded.push(entry);
    }

    if uploaded.is_empty() {
        return Err(ApiError::BadRequest("No file field in upload".to_string()));
    }

    let results = uploaded
        .iter()
        .map(|entry| UploadResult {
            file_name: entry.file_name.clone(),
            caption: entry.caption().to_string(),
        })
        .collect();

    let mut gallery = state.gallery.write().await;
    for entry in uploaded {
        gallery.insert(entry);
    }

    Ok(Json(results))
}
