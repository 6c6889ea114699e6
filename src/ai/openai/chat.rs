use super::client::OpenAiHttpClient;
use super::types::ChatCompletionRequest;
use crate::ai::{fusion_messages, ChatService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Upper bound on completion output; a 500-character paragraph fits well
/// within this.
const MAX_COMPLETION_TOKENS: u32 = 600;

pub struct OpenAiChatClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, Duration::from_secs(30), client),
            model,
        }
    }

    /// Point the client at a non-default endpoint (`OPENAI_BASE_URL`).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ChatService for OpenAiChatClient {
    async fn fuse_paragraph(&self, noun1: &str, noun2: &str) -> Result<String> {
        tracing::debug!("Requesting fusion paragraph from OpenAI");

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: fusion_messages(noun1, noun2),
            temperature: 0.0,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self.http.chat_completion(&request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::UpstreamFailure("No response from OpenAI chat API".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn in_contract_paragraph() -> String {
        "A woven sandal of circuitry. ".repeat(17).trim().to_string()
    }

    #[tokio::test]
    async fn test_fuse_paragraph_parses_response() {
        let server = MockServer::start().await;
        let paragraph = in_contract_paragraph();

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": paragraph
                    },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new("test-key".to_string(), "gpt-4o-mini".to_string())
            .with_base_url(server.uri());

        let result = client.fuse_paragraph("flip-flop", "ChatGPT").await.unwrap();
        assert_eq!(result, paragraph);
    }

    #[tokio::test]
    async fn test_fuse_paragraph_sends_nouns_in_two_line_format() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("A: flip-flop\\nB: ChatGPT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "fused" },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new("key".to_string(), "gpt-4o-mini".to_string())
            .with_base_url(server.uri());

        client.fuse_paragraph("flip-flop", "ChatGPT").await.unwrap();
    }

    #[tokio::test]
    async fn test_fuse_paragraph_pins_temperature_to_zero() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("\"temperature\":0"))
            .and(body_string_contains("\"model\":\"custom-model\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "fused" },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new("key".to_string(), "custom-model".to_string())
            .with_base_url(server.uri());

        client.fuse_paragraph("lamp", "octopus").await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_returns_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new("key".to_string(), "gpt-4o-mini".to_string())
            .with_base_url(server.uri());

        let err = client.fuse_paragraph("lamp", "octopus").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamFailure(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_returns_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new("key".to_string(), "gpt-4o-mini".to_string())
            .with_base_url(server.uri());

        let err = client.fuse_paragraph("lamp", "octopus").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamFailure(_)));
    }
}
