use super::ChatService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_paragraph_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make every call fail with an upstream error.
    pub fn with_failure(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn fuse_paragraph(&self, noun1: &str, noun2: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if *self.fail.lock().unwrap() {
            return Err(Error::UpstreamFailure("mock chat failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(format!("A fused object of {} and {}", noun1, noun2))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chat_client_default_response() {
        let client = MockChatClient::new();

        let paragraph = client.fuse_paragraph("apple", "lamp").await.unwrap();
        assert!(paragraph.contains("apple"));
        assert!(paragraph.contains("lamp"));
    }

    #[tokio::test]
    async fn test_mock_chat_client_custom_responses_cycle() {
        let client = MockChatClient::new()
            .with_paragraph_response("First fusion".to_string())
            .with_paragraph_response("Second fusion".to_string());

        assert_eq!(
            client.fuse_paragraph("a", "b").await.unwrap(),
            "First fusion"
        );
        assert_eq!(
            client.fuse_paragraph("a", "b").await.unwrap(),
            "Second fusion"
        );

        // Should cycle back
        assert_eq!(
            client.fuse_paragraph("a", "b").await.unwrap(),
            "First fusion"
        );
    }

    #[tokio::test]
    async fn test_mock_chat_client_failure_and_call_count() {
        let client = MockChatClient::new().with_failure();

        assert_eq!(client.get_call_count(), 0);
        let err = client.fuse_paragraph("a", "b").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamFailure(_)));
        assert_eq!(client.get_call_count(), 1);
    }
}
