//! LLM Client abstractions and provider management
//!
//! This module provides a unified interface for the completion providers
//! backing `CompletionAgent`:
//! - **OpenAI**: any OpenAI-compatible chat completions endpoint
//! - **Ollama**: local inference (requires the `ollama` feature)

use crate::types::Result;
use crate::utils::toml_config::{LlmConfig, ProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A single completion call: one system instruction and one user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction (persona and behavioral directive)
    pub system: String,
    /// End-user prompt
    pub prompt: String,
    /// Model identifier passed to the provider
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Generic LLM client trait for provider abstraction
///
/// Implementations own their timeout policy; a timeout must surface as an
/// `AppError::Provider`.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Run one completion and return the generated text
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Human-readable provider name
    fn provider_name(&self) -> &str;
}

/// Model parameters shared by every completion agent
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationSettings {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from_config(&LlmConfig::default())
    }
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API or any compatible endpoint
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: Some("sk-...".to_string()),
    ///     api_base: "https://api.openai.com/v1".to_string(),
    ///     timeout: Duration::from_secs(60),
    /// };
    /// ```
    OpenAI {
        api_key: Option<String>,
        api_base: String,
        timeout: Duration,
    },

    /// Ollama local LLM provider
    Ollama { base_url: String, timeout: Duration },
}

impl Provider {
    /// Build the provider described by the `[llm]` config section.
    ///
    /// `api_key` is the already-resolved key (looked up from `api_key_env`).
    pub fn from_config(config: &LlmConfig, api_key: Option<String>) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        match config.provider {
            ProviderKind::OpenAI => Provider::OpenAI {
                api_key,
                api_base: config.api_base.clone(),
                timeout,
            },
            ProviderKind::Ollama => Provider::Ollama {
                base_url: config.ollama_url.clone(),
                timeout,
            },
        }
    }

    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, or if Ollama is
    /// requested without the `ollama` feature.
    pub fn create_client(&self) -> Result<Arc<dyn LLMClient>> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                timeout,
            } => Ok(Arc::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                *timeout,
            )?)),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, timeout } => Ok(Arc::new(
                super::ollama::OllamaClient::new(base_url, *timeout)?,
            )),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { base_url, .. } => Err(crate::types::AppError::Configuration(format!(
                "Ollama provider at '{}' requested but triad was built without the 'ollama' feature",
                base_url
            ))),
        }
    }

    /// Check if this provider is compiled into the binary
    pub fn is_available(&self) -> bool {
        match self {
            Provider::OpenAI { .. } => true,
            Provider::Ollama { .. } => cfg!(feature = "ollama"),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }
}

/// Everything a completion agent needs: a shared client plus model parameters
#[derive(Clone)]
pub struct CompletionBackend {
    pub client: Arc<dyn LLMClient>,
    pub settings: GenerationSettings,
}

impl CompletionBackend {
    pub fn new(client: Arc<dyn LLMClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }
}

impl std::fmt::Debug for CompletionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionBackend")
            .field("provider", &self.client.provider_name())
            .field("settings", &self.settings)
            .finish()
    }
}
