use super::client::AzureHttpClient;
use crate::ai::openai::types::ChatCompletionRequest;
use crate::ai::{fusion_messages, ChatService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const MAX_COMPLETION_TOKENS: u32 = 600;

pub struct AzureChatClient {
    http: AzureHttpClient,
    deployment: String,
}

impl AzureChatClient {
    pub fn new(api_key: String, endpoint: String, deployment: String, api_version: String) -> Self {
        Self::new_with_client(
            api_key,
            endpoint,
            deployment,
            api_version,
            reqwest::Client::new(),
        )
    }

    pub fn new_with_client(
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: AzureHttpClient::new_with_client(
                api_key,
                endpoint,
                deployment.clone(),
                api_version,
                Duration::from_secs(30),
                client,
            ),
            deployment,
        }
    }
}

#[async_trait]
impl ChatService for AzureChatClient {
    async fn fuse_paragraph(&self, noun1: &str, noun2: &str) -> Result<String> {
        tracing::debug!("Requesting fusion paragraph from Azure OpenAI");

        // Azure routes by the deployment in the URL; the model field rides
        // along for parity with the default provider.
        let request = ChatCompletionRequest {
            model: self.deployment.clone(),
            messages: fusion_messages(noun1, noun2),
            temperature: 0.0,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self.http.chat_completion(&request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                Error::UpstreamFailure("No response from Azure OpenAI chat API".to_string())
            })
    }
}
