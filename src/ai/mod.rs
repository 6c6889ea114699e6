//! Text-generation backend clients for noun fusion
//!
//! Provides the chat-completion interface that turns two nouns into one
//! fused paragraph, with a default provider, an Azure-hosted variant, and a
//! mock for tests.

pub mod azure;
pub mod mock;
pub mod openai;

pub use azure::AzureChatClient;
pub use mock::MockChatClient;
pub use openai::OpenAiChatClient;

use crate::prompts;
use crate::Result;
use async_trait::async_trait;
use openai::types::ChatMessage;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Produce the fused descriptive paragraph for two nouns.
    async fn fuse_paragraph(&self, noun1: &str, noun2: &str) -> Result<String>;
}

/// Build the fixed system + two-line user turn shared by both providers.
pub(crate) fn fusion_messages(noun1: &str, noun2: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: Some(prompts::FUSION_SYSTEM.to_string()),
        },
        ChatMessage {
            role: "user".to_string(),
            content: Some(prompts::render(
                prompts::FUSION_USER,
                &[("noun1", noun1), ("noun2", noun2)],
            )),
        },
    ]
}
