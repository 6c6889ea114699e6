//! Fusion orchestration: prompt the text backend, shape the paragraph,
//! optionally fetch an image.

use crate::ai::{AzureChatClient, ChatService, OpenAiChatClient};
use crate::image::{ImageClient, ImageService};
use crate::length;
use crate::models::{Config, FusionRequest, FusionResult, TextProvider};
use crate::{Error, Result};
use tracing::{debug, info, warn};

const MAX_NOUN_CHARS: usize = 500;
const MAX_STYLE_TAIL_CHARS: usize = 200;

/// Coordinates the text-generation call, the length contract, and the
/// optional image hop for one fusion request.
pub struct FusionEngine {
    chat: Box<dyn ChatService>,
    image: Option<Box<dyn ImageService>>,
}

impl FusionEngine {
    /// Build an engine from concrete service dependencies.
    ///
    /// This is primarily useful for tests and local harnesses that need to
    /// inject mocks.
    pub fn with_services(chat: Box<dyn ChatService>, image: Option<Box<dyn ImageService>>) -> Self {
        Self { chat, image }
    }

    /// Construct an engine from environment configuration (`Config::from_env`).
    pub fn from_config(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across backend clients.
        let http_client = reqwest::Client::new();

        let chat: Box<dyn ChatService> = match config.text_provider() {
            TextProvider::OpenAi => {
                info!("Text provider: OpenAI (model: {})", config.model);
                let mut client = OpenAiChatClient::new_with_client(
                    config.api_key.clone(),
                    config.model.clone(),
                    http_client.clone(),
                );
                if let Some(base_url) = &config.openai_base_url {
                    client = client.with_base_url(base_url.clone());
                }
                Box::new(client)
            }
            TextProvider::AzureOpenAi => {
                let endpoint = config
                    .azure_endpoint
                    .clone()
                    .expect("AZURE_OPENAI_ENDPOINT checked by text_provider");
                info!(
                    "Text provider: Azure OpenAI (deployment: {})",
                    config.azure_deployment_name()
                );
                Box::new(AzureChatClient::new_with_client(
                    config.api_key.clone(),
                    endpoint,
                    config.azure_deployment_name().to_string(),
                    config.azure_api_version.clone(),
                    http_client.clone(),
                ))
            }
        };

        let image: Option<Box<dyn ImageService>> = match &config.image_api_url {
            Some(url) => {
                info!("Image backend configured: {}", url);
                Some(Box::new(ImageClient::new_with_client(
                    url.clone(),
                    http_client,
                )))
            }
            None => {
                info!("No image backend configured, image requests will be no-ops");
                None
            }
        };

        Ok(Self::with_services(chat, image))
    }

    /// Fuse two nouns into one bounded paragraph, with an optional image.
    ///
    /// Text-backend and length-contract failures abort the whole request.
    /// Image-backend failures never do: the fusion result is still returned
    /// with a null image URL.
    pub async fn fuse(&self, request: &FusionRequest) -> Result<FusionResult> {
        validate(request)?;

        let noun1 = request.noun1.trim();
        let noun2 = request.noun2.trim();
        info!("Fusing nouns: {:?} + {:?}", noun1, noun2);

        let raw = self.chat.fuse_paragraph(noun1, noun2).await?;
        let raw = raw.trim().to_string();
        if raw.is_empty() {
            return Err(Error::UpstreamFailure(
                "Text backend returned empty content".to_string(),
            ));
        }
        debug!("Raw paragraph length: {} chars", raw.chars().count());

        let (paragraph, truncated) = length::apply(raw, request.enforce_length)?;

        let mut image_prompt = None;
        let mut image_url = None;
        if request.request_image {
            if let Some(image) = &self.image {
                let prompt = build_image_prompt(&paragraph, request.image_style_tail.as_deref());
                match image.generate(&prompt).await {
                    Ok(url) => image_url = url,
                    Err(e) => {
                        warn!("Image backend failed, returning fusion without image: {}", e);
                    }
                }
                image_prompt = Some(prompt);
            } else {
                debug!("Image requested but no backend configured, skipping");
            }
        }

        Ok(FusionResult {
            paragraph,
            truncated,
            image_prompt,
            image_url,
        })
    }
}

fn validate(request: &FusionRequest) -> Result<()> {
    for (field, value) in [("noun1", &request.noun1), ("noun2", &request.noun2)] {
        if value.trim().is_empty() {
            return Err(Error::InvalidRequest(format!("{} must not be empty", field)));
        }
        if value.chars().count() > MAX_NOUN_CHARS {
            return Err(Error::InvalidRequest(format!(
                "{} exceeds {} characters",
                field, MAX_NOUN_CHARS
            )));
        }
    }

    if let Some(tail) = &request.image_style_tail {
        if tail.chars().count() > MAX_STYLE_TAIL_CHARS {
            return Err(Error::InvalidRequest(format!(
                "image_style_tail exceeds {} characters",
                MAX_STYLE_TAIL_CHARS
            )));
        }
    }

    Ok(())
}

/// Join rule for the image prompt: the paragraph, optionally followed by a
/// single space and the trimmed style tail.
fn build_image_prompt(paragraph: &str, style_tail: Option<&str>) -> String {
    match style_tail.map(str::trim).filter(|tail| !tail.is_empty()) {
        Some(tail) => format!("{} {}", paragraph, tail),
        None => paragraph.to_string(),
    }
}
