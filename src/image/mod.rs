//! Optional image backend integration
//!
//! Forwards the fused paragraph to a configured image-generation endpoint
//! and extracts the resulting image URL. The whole module is optional: when
//! no endpoint is configured the engine never constructs a client.

pub mod client;
pub mod mock;

pub use client::ImageClient;
pub use mock::MockImageClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageService: Send + Sync {
    /// Request an image for the prompt, returning its URL when the backend
    /// supplies one.
    async fn generate(&self, prompt: &str) -> Result<Option<String>>;
}
