use super::ImageService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for any HTTP image backend accepting `{"prompt": "..."}`.
pub struct ImageClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ImagePromptRequest<'a> {
    prompt: &'a str,
}

/// Backends differ on the URL key; accept either.
#[derive(Debug, Deserialize)]
struct ImageUrlResponse {
    url: Option<String>,
    image_url: Option<String>,
}

impl ImageClient {
    pub fn new(endpoint: String) -> Self {
        Self::new_with_client(endpoint, Client::new())
    }

    pub fn new_with_client(endpoint: String, client: Client) -> Self {
        Self {
            client,
            endpoint,
            timeout: Duration::from_secs(60),
        }
    }
}

#[async_trait]
impl ImageService for ImageClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        tracing::debug!(
            "Sending prompt to image backend ({} chars)",
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&ImagePromptRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to image backend: {}", e);
                Error::ImageBackend(format!("Failed to reach image backend: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Image backend error (status {}): {}", status, error_text);
            return Err(Error::ImageBackend(format!(
                "Image backend error (status {}): {}",
                status, error_text
            )));
        }

        let body: ImageUrlResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse image backend response: {}", e);
            Error::ImageBackend(format!("Failed to parse image backend response: {}", e))
        })?;

        Ok(body.url.or(body.image_url))
    }
}
