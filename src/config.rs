//! Command-line and environment configuration for capcloud.

use clap::Parser;
use std::path::PathBuf;

/// Prefix applied to files uploaded through the web UI, so cleanup can
/// distinguish them from pre-seeded gallery images.
pub const UPLOAD_PREFIX: &str = "upload-";

/// URL path under which gallery images are served to the browser.
pub const IMAGE_URL_BASE: &str = "static/img/images";

/// Path component of the model's predict endpoint.
const PREDICT_PATH: &str = "/model/predict";

/// Command-line arguments for capcloud
#[derive(Parser, Debug, Clone)]
#[command(name = "capcloud")]
#[command(about = "Image caption gallery with a word-cloud view")]
#[command(version)]
pub struct Args {
    /// Port the web app listens on
    #[arg(long, default_value = "8088", env = "CAPCLOUD_PORT")]
    pub port: u16,

    /// Base URL of the image caption model REST endpoint
    #[arg(
        long = "ml-endpoint",
        default_value = "http://localhost:5000",
        env = "CAPCLOUD_ML_ENDPOINT"
    )]
    pub ml_endpoint: String,

    /// Directory holding gallery images on disk
    #[arg(long, default_value = "static/img/images", env = "CAPCLOUD_IMAGE_DIR")]
    pub image_dir: PathBuf,
}

impl Args {
    /// Full predict URL for the caption model.
    ///
    /// Appends the predict path unless the configured endpoint already
    /// carries it, so both bare hosts and full URLs are accepted.
    pub fn predict_url(&self) -> String {
        if self.ml_endpoint.contains(PREDICT_PATH) {
            self.ml_endpoint.clone()
        } else {
            format!("{}{}", self.ml_endpoint.trim_end_matches('/'), PREDICT_PATH)
        }
    }
}

/// URL path for a gallery image file name (the `src` the browser loads).
pub fn image_url(file_name: &str) -> String {
    format!("{}/{}", IMAGE_URL_BASE, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_endpoint(endpoint: &str) -> Args {
        Args {
            port: 8088,
            ml_endpoint: endpoint.to_string(),
            image_dir: PathBuf::from("static/img/images"),
        }
    }

    #[test]
    fn predict_url_appends_model_path() {
        let args = args_with_endpoint("http://localhost:5000");
        assert_eq!(args.predict_url(), "http://localhost:5000/model/predict");
    }

    #[test]
    fn predict_url_strips_trailing_slash() {
        let args = args_with_endpoint("http://localhost:5000/");
        assert_eq!(args.predict_url(), "http://localhost:5000/model/predict");
    }

    #[test]
    fn predict_url_keeps_full_endpoint() {
        let args = args_with_endpoint("http://caption-host:5000/model/predict");
        assert_eq!(args.predict_url(), "http://caption-host:5000/model/predict");
    }

    #[test]
    fn image_url_prefixes_static_path() {
        assert_eq!(
            image_url("upload-cat.jpg"),
            "static/img/images/upload-cat.jpg"
        );
    }
}
