//! HTTP client for a running Triad server
//!
//! Thin wrapper over `reqwest` mirroring the REST surface one method per
//! endpoint. Responses are returned as raw JSON so the CLI can print exactly
//! what the server sent.

use super::ClientCommands;
use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Method, StatusCode, Url};
use serde_json::{Value, json};
use std::time::Duration;

/// Client for the Triad REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid server URL '{}'", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Server URL '{}' cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, segments: &[&str], body: Option<Value>) -> Result<Value> {
        let url = self.url(segments)?;
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, url))?;
        let status = response.status();
        let text = response.text().await.context("Failed to read response body")?;

        if !status.is_success() {
            bail!("{}", describe_failure(status, &text));
        }

        serde_json::from_str(&text).with_context(|| format!("Invalid JSON from {}", url))
    }

    pub async fn health(&self) -> Result<Value> {
        self.send(Method::GET, &["health"], None).await
    }

    pub async fn create_agent(&self, name: &str, kind: Option<&str>) -> Result<Value> {
        let mut body = json!({ "agent_name": name });
        if let Some(kind) = kind {
            body["type"] = json!(kind);
        }
        self.send(Method::POST, &["agent", "create"], Some(body)).await
    }

    pub async fn list_agents(&self) -> Result<Value> {
        self.send(Method::GET, &["agent", "list"], None).await
    }

    pub async fn agent_info(&self, name: &str) -> Result<Value> {
        self.send(Method::GET, &["agent", name], None).await
    }

    pub async fn delete_agent(&self, name: &str) -> Result<Value> {
        self.send(Method::DELETE, &["agent", name], None).await
    }

    pub async fn ask(&self, name: &str, prompt: &str) -> Result<Value> {
        self.send(
            Method::POST,
            &["agent", name, "ask"],
            Some(json!({ "prompt": prompt })),
        )
        .await
    }

    pub async fn study(&self, name: &str, prompt: &str, context: Option<&str>) -> Result<Value> {
        let mut body = json!({ "prompt": prompt });
        if let Some(context) = context {
            body["context"] = json!(context);
        }
        self.send(Method::POST, &["agent", name, "study"], Some(body)).await
    }

    pub async fn plan(&self, name: &str, prompt: &str, goals: &[String]) -> Result<Value> {
        let mut body = json!({ "prompt": prompt });
        if !goals.is_empty() {
            body["goals"] = json!(goals);
        }
        self.send(Method::POST, &["agent", name, "plan"], Some(body)).await
    }

    pub async fn history(&self, name: &str) -> Result<Value> {
        self.send(Method::GET, &["agent", name, "history"], None).await
    }

    pub async fn clear_history(&self, name: &str) -> Result<Value> {
        self.send(Method::DELETE, &["agent", name, "history"], None).await
    }

    /// Dispatch a parsed client subcommand
    pub async fn execute(&self, command: &ClientCommands) -> Result<Value> {
        match command {
            ClientCommands::Create { name, kind } => self.create_agent(name, kind.as_deref()).await,
            ClientCommands::List => self.list_agents().await,
            ClientCommands::Info { name } => self.agent_info(name).await,
            ClientCommands::Delete { name } => self.delete_agent(name).await,
            ClientCommands::Ask { name, prompt } => self.ask(name, prompt).await,
            ClientCommands::Study {
                name,
                prompt,
                context,
            } => self.study(name, prompt, context.as_deref()).await,
            ClientCommands::Plan { name, prompt, goals } => self.plan(name, prompt, goals).await,
            ClientCommands::History { name } => self.history(name).await,
            ClientCommands::ClearHistory { name } => self.clear_history(name).await,
            ClientCommands::Health => self.health().await,
        }
    }
}

/// Prefer the server's `{"error": ...}` message over the raw body
fn describe_failure(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    format!("Server returned {}: {}", status, message)
}
