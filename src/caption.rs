//! HTTP client for the image caption model service.
//!
//! The model service exposes a single predict endpoint taking a multipart
//! `image` part and returning a JSON list of caption predictions.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::gallery::Prediction;

const USER_AGENT: &str = concat!("capcloud/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Caption client errors
#[derive(Debug, Error)]
pub enum CaptionError {
    /// Could not reach the caption service
    #[error("caption service unreachable: {0}")]
    Network(String),

    /// Caption service responded with a non-success status
    #[error("caption service returned status {0}: {1}")]
    Api(u16, String),

    /// Response body was not the expected JSON shape
    #[error("failed to parse caption response: {0}")]
    Parse(String),

    /// Service answered successfully but produced no predictions
    #[error("caption service returned no predictions")]
    NoPredictions,
}

/// Predict endpoint response shape.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Prediction>,
}

/// Client for the caption model's REST endpoint.
pub struct CaptionClient {
    http_client: reqwest::Client,
    predict_url: String,
}

impl CaptionClient {
    pub fn new(predict_url: String) -> Result<Self, CaptionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CaptionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            predict_url,
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    /// Startup connectivity probe.
    ///
    /// Only reachability matters here: the predict endpoint may well answer
    /// a GET with 405, which still proves the service is up.
    pub async fn check(&self) -> Result<(), CaptionError> {
        self.http_client
            .get(&self.predict_url)
            .send()
            .await
            .map_err(|e| CaptionError::Network(e.to_string()))?;
        Ok(())
    }

    /// Request captions for one image.
    pub async fn predict(
        &self,
        file_name: &str,
        image_bytes: Vec<u8>,
    ) -> Result<Vec<Prediction>, CaptionError> {
        debug!(file_name, bytes = image_bytes.len(), "Requesting caption");

        let part = reqwest::multipart::Part::bytes(image_bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .http_client
            .post(&self.predict_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CaptionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CaptionError::Api(status.as_u16(), error_text));
        }

        let predict_response: PredictResponse = response
            .json()
            .await
            .map_err(|e| CaptionError::Parse(e.to_string()))?;

        if predict_response.predictions.is_empty() {
            return Err(CaptionError::NoPredictions);
        }

        Ok(predict_response.predictions)
    }
}
