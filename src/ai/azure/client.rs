use crate::ai::openai::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

/// REST client for the Azure-hosted chat variant.
///
/// Azure serves the same chat-completion wire format as the default
/// provider but routes by deployment name and API version, and
/// authenticates with an `api-key` header instead of a bearer token.
pub struct AzureHttpClient {
    client: Client,
    api_key: String,
    endpoint: String,
    deployment: String,
    api_version: String,
    timeout: Duration,
}

impl AzureHttpClient {
    pub fn new(
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: String,
        timeout: Duration,
    ) -> Self {
        Self::new_with_client(
            api_key,
            endpoint,
            deployment,
            api_version,
            timeout,
            Client::new(),
        )
    }

    pub fn new_with_client(
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        let endpoint = endpoint.trim_end_matches('/').to_string();

        Self {
            client,
            api_key,
            endpoint,
            deployment,
            api_version,
            timeout,
        }
    }

    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Azure OpenAI: {}", e);
                Error::UpstreamFailure(format!("Failed to reach Azure OpenAI: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Azure OpenAI API error (status {}): {}", status, error_text);
            return Err(Error::UpstreamFailure(format!(
                "Azure OpenAI API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await.map_err(|e| {
            Error::UpstreamFailure(format!("Failed to read Azure OpenAI response: {}", e))
        })?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Azure OpenAI response: {}\nBody: {}", e, body);
            Error::UpstreamFailure(format!("Failed to parse Azure OpenAI response: {}", e))
        })
    }
}
