//! Holiday wish generation through the Gemini `generateContent` endpoint.
//!
//! The service never fails from the caller's point of view: without a
//! credential it returns a fixed wish without touching the network, and any
//! remote failure is logged and replaced by a second fixed wish.
//!
//! Requests go out through the browser's fetch (reqwest's wasm32 backend).
//! Native builds never open a connection: a keyed call reports
//! [`PhraseError::Unsupported`] and falls back like any remote failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when no API key was available at build time.
pub const MISSING_CREDENTIAL_WISH: &str =
    "May your holidays be filled with golden moments and emerald dreams.";
/// Returned when the remote call fails for any reason.
pub const REMOTE_FAILURE_WISH: &str = "Wishing you a season of splendor and magnificence.";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_INSTRUCTION: &str = "Write a short, ultra-luxurious, elegant Christmas wish (max 20 words). The tone should be opulent, sophisticated, and warm. Avoid emojis.";

#[derive(Error, Debug)]
pub enum PhraseError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote returned status {0}")]
    Status(u16),

    #[error("Response contained no text")]
    EmptyResponse,

    /// Native builds have no async HTTP runtime; only the browser's fetch is used.
    #[error("Remote calls are only made from the browser build")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, PhraseError>;

#[derive(Debug, Clone)]
pub struct PhraseConfig {
    pub endpoint: String,
    pub model: String,
    pub instruction: String,
    pub temperature: f32,
    pub thinking_budget: u32,
    pub api_key: Option<String>,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            instruction: DEFAULT_INSTRUCTION.to_string(),
            temperature: 0.9,
            thinking_budget: 0,
            api_key: None,
        }
    }
}

impl PhraseConfig {
    /// Defaults plus the key baked in from `GEMINI_API_KEY` at compile time, if any.
    pub fn from_build_env() -> Self {
        let api_key = option_env!("GEMINI_API_KEY")
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    pub fn request_body(&self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: self.instruction.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                thinking_config: ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            },
        }
    }
}

// Wire types (camelCase on the wire).

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub thinking_config: ThinkingConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated and trimmed.
    pub fn text(&self) -> Result<String> {
        let text: String = self
            .candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(PhraseError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Cloneable handle; clones share the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct PhraseService {
    config: PhraseConfig,
    #[cfg(target_arch = "wasm32")]
    http: reqwest::Client,
}

impl PhraseService {
    pub fn new(config: PhraseConfig) -> Self {
        Self {
            config,
            #[cfg(target_arch = "wasm32")]
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &PhraseConfig {
        &self.config
    }

    /// Produce a wish. Always yields displayable text.
    pub async fn generate(&self) -> String {
        wish_for(self.try_generate().await)
    }

    /// One request, no retries.
    pub async fn try_generate(&self) -> Result<String> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(PhraseError::MissingCredential)?;
        self.request(key).await
    }

    #[cfg(target_arch = "wasm32")]
    async fn request(&self, key: &str) -> Result<String> {
        let response = self
            .http
            .post(self.config.url())
            .header("x-goog-api-key", key)
            .json(&self.config.request_body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhraseError::Status(status.as_u16()));
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text()
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn request(&self, _key: &str) -> Result<String> {
        Err(PhraseError::Unsupported)
    }
}

/// Collapse a request outcome into displayable text.
pub fn wish_for(result: Result<String>) -> String {
    match result {
        Ok(text) => text,
        Err(PhraseError::MissingCredential) => {
            log::debug!("No API key configured, using the default wish");
            MISSING_CREDENTIAL_WISH.to_string()
        }
        Err(e) => {
            log::error!("Wish generation failed: {}", e);
            REMOTE_FAILURE_WISH.to_string()
        }
    }
}

impl Default for PhraseService {
    fn default() -> Self {
        Self::new(PhraseConfig::from_build_env())
    }
}
