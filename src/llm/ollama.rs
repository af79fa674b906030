use crate::llm::client::{CompletionRequest, LLMClient};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    models::ModelOptions,
};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

const DEFAULT_OLLAMA_PORT: u16 = 11434;

pub struct OllamaClient {
    client: Ollama,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let (host, port) = split_base_url(base_url)?;
        Ok(Self {
            client: Ollama::new(host, port),
            timeout,
        })
    }
}

/// Split `http://host:port` into the `(scheme://host, port)` pair Ollama expects
fn split_base_url(base_url: &str) -> Result<(String, u16)> {
    let url = Url::parse(base_url)
        .map_err(|e| AppError::Configuration(format!("Invalid Ollama URL '{}': {}", base_url, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| AppError::Configuration(format!("Ollama URL '{}' has no host", base_url)))?;
    let port = url.port().unwrap_or(DEFAULT_OLLAMA_PORT);

    Ok((format!("{}://{}", url.scheme(), host), port))
}

fn num_predict(max_tokens: u32) -> Result<i32> {
    i32::try_from(max_tokens).map_err(|_| {
        AppError::Provider(format!(
            "max_tokens {} exceeds the Ollama limit of {}",
            max_tokens,
            i32::MAX
        ))
    })
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let messages = vec![
            ChatMessage::system(request.system.clone()),
            ChatMessage::user(request.prompt.clone()),
        ];

        let options = ModelOptions::default()
            .temperature(request.temperature)
            .num_predict(num_predict(request.max_tokens)?);

        let chat = ChatMessageRequest::new(request.model.clone(), messages).options(options);

        debug!(model = %request.model, "Ollama request");

        let response = tokio::time::timeout(self.timeout, self.client.send_chat_messages(chat))
            .await
            .map_err(|_| {
                AppError::Provider(format!(
                    "Ollama request timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::Provider(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}
