//! Word cloud data endpoint

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::wordcloud::{self, CloudWord};
use crate::AppState;

/// Word cloud payload: canvas geometry, font, and the precomputed words.
///
/// The browser hands `words` straight to the cloud layout library; all
/// counting, scaling, and coloring has already happened here.
#[derive(Debug, Serialize)]
pub struct CloudResponse {
    pub width: u32,
    pub height: u32,
    pub font: &'static str,
    pub words: Vec<CloudWord>,
}

/// GET /api/wordcloud
///
/// Recomputed from the current gallery captions on every request; there is
/// no cached or incremental state.
pub async fn get_wordcloud(State(state): State<AppState>) -> Json<CloudResponse> {
    let gallery = state.gallery.read().await;
    let captions = gallery.captions();
    let words = wordcloud::build_cloud(captions.iter().map(String::as_str));

    Json(CloudResponse {
        width: wordcloud::CANVAS_WIDTH,
        height: wordcloud::CANVAS_HEIGHT,
        font: wordcloud::FONT_FAMILY,
        words,
    })
}
