//! Data models and structures
//!
//! Defines the request/response shapes for the fusion API and the
//! environment-sourced configuration.

use serde::{Deserialize, Serialize};

/// Incoming fusion request: two nouns plus shaping options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionRequest {
    pub noun1: String,
    pub noun2: String,
    #[serde(default)]
    pub request_image: bool,
    #[serde(default = "default_enforce_length")]
    pub enforce_length: bool,
    #[serde(default)]
    pub image_style_tail: Option<String>,
}

fn default_enforce_length() -> bool {
    true
}

impl FusionRequest {
    pub fn new(noun1: impl Into<String>, noun2: impl Into<String>) -> Self {
        Self {
            noun1: noun1.into(),
            noun2: noun2.into(),
            request_image: false,
            enforce_length: true,
            image_style_tail: None,
        }
    }
}

/// Outcome of one fusion: the paragraph plus optional image fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionResult {
    pub paragraph: String,
    pub truncated: bool,
    pub image_prompt: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Which chat-completion backend serves the fusion prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextProvider {
    OpenAi,
    AzureOpenAi,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub openai_base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
    pub image_api_url: Option<String>,
    pub listen_addr: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("AZURE_OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                crate::Error::Generic(
                    "OPENAI_API_KEY or AZURE_OPENAI_API_KEY not set".to_string(),
                )
            })?;

        Ok(Self {
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_base_url: std::env::var("OPENAI_BASE_URL").ok(),
            azure_endpoint: std::env::var("AZURE_OPENAI_ENDPOINT").ok(),
            azure_deployment: std::env::var("AZURE_OPENAI_DEPLOYMENT").ok(),
            azure_api_version: std::env::var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|_| "2024-05-01-preview".to_string()),
            image_api_url: std::env::var("IMAGE_API_URL").ok(),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
        })
    }

    /// Presence of an Azure endpoint selects the enterprise-hosted variant.
    pub fn text_provider(&self) -> TextProvider {
        if self.azure_endpoint.is_some() {
            TextProvider::AzureOpenAi
        } else {
            TextProvider::OpenAi
        }
    }

    /// Deployment name for the Azure variant, falling back to the model name.
    pub fn azure_deployment_name(&self) -> &str {
        self.azure_deployment.as_deref().unwrap_or(&self.model)
    }
}
