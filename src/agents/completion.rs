//! Provider-backed agent.
//!
//! Each mode pairs a fixed system instruction with a shaped user prompt and
//! sends both to the configured [`LLMClient`]. Provider failures are absorbed:
//! the error description becomes the response text and the call is still
//! recorded in history, so mode calls never fail at this boundary.

use crate::agents::{Agent, AgentProfile};
use crate::llm::{CompletionBackend, CompletionRequest, GenerationSettings, LLMClient};
use crate::types::{AgentKind, Metadata, Mode, ResponseEnvelope};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_DESCRIPTION: &str = "Agent backed by an LLM completion provider";

const ASK_SYSTEM_PROMPT: &str = r#"You are a smart and helpful assistant.
Answer questions directly, concisely and clearly.
Get straight to the point."#;

const STUDY_SYSTEM_PROMPT: &str = r#"You are an experienced teacher and researcher.
When asked, provide deep and detailed analyses.
Include context, practical examples and important insights.
Structure your answers clearly and in an organized way."#;

const PLAN_SYSTEM_PROMPT: &str = r#"You are an experienced strategist and planner.
When asked, create structured and feasible action plans.
Include clear steps, goals, a timeline and the resources needed.
Be practical and objective."#;

pub struct CompletionAgent {
    profile: AgentProfile,
    client: Arc<dyn LLMClient>,
    settings: GenerationSettings,
}

impl CompletionAgent {
    pub fn new(name: impl Into<String>, backend: CompletionBackend) -> Self {
        Self::with_description(name, DEFAULT_DESCRIPTION, backend)
    }

    pub fn with_description(
        name: impl Into<String>,
        description: impl Into<String>,
        backend: CompletionBackend,
    ) -> Self {
        Self {
            profile: AgentProfile::new(name, description),
            client: backend.client,
            settings: backend.settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Fixed persona and directive for a mode
    pub fn system_prompt(mode: Mode) -> &'static str {
        match mode {
            Mode::Ask => ASK_SYSTEM_PROMPT,
            Mode::Study => STUDY_SYSTEM_PROMPT,
            Mode::Plan => PLAN_SYSTEM_PROMPT,
        }
    }

    pub fn study_prompt(prompt: &str, context: Option<&str>) -> String {
        match context.filter(|c| !c.is_empty()) {
            Some(context) => format!("Context: {}\n\nAnalysis: {}", context, prompt),
            None => prompt.to_string(),
        }
    }

    pub fn plan_prompt(prompt: &str, goals: Option<&[String]>) -> String {
        match goals.filter(|g| !g.is_empty()) {
            Some(goals) => {
                let goals_text = goals
                    .iter()
                    .map(|goal| format!("- {}", goal))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "Objective: {}\n\nSpecific goals:\n{}\n\nCreate a detailed plan.",
                    prompt, goals_text
                )
            }
            None => prompt.to_string(),
        }
    }

    /// Call the provider, converting any failure into user-visible text
    async fn generate(&self, mode: Mode, prompt: String) -> String {
        let request = CompletionRequest {
            system: Self::system_prompt(mode).to_string(),
            prompt,
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!(
            agent = %self.profile.name,
            mode = %mode,
            provider = self.client.provider_name(),
            model = %self.settings.model,
            "completion request"
        );

        match self.client.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(agent = %self.profile.name, mode = %mode, error = %e, "completion provider failed");
                format!("Error calling completion provider: {}", e)
            }
        }
    }

    fn base_metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("model".to_string(), json!(self.settings.model));
        metadata
    }
}

#[async_trait]
impl Agent for CompletionAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut AgentProfile {
        &mut self.profile
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Completion
    }

    async fn ask(&mut self, prompt: &str) -> ResponseEnvelope {
        let text = self.generate(Mode::Ask, prompt.to_string()).await;
        let envelope = ResponseEnvelope::new(Mode::Ask, prompt, text, self.base_metadata());
        self.record(envelope)
    }

    async fn study(&mut self, prompt: &str, context: Option<&str>) -> ResponseEnvelope {
        let text = self
            .generate(Mode::Study, Self::study_prompt(prompt, context))
            .await;

        let mut metadata = self.base_metadata();
        metadata.insert("context_provided".to_string(), json!(context.is_some()));

        let envelope = ResponseEnvelope::new(Mode::Study, prompt, text, metadata);
        self.record(envelope)
    }

    async fn plan(&mut self, prompt: &str, goals: Option<&[String]>) -> ResponseEnvelope {
        let text = self
            .generate(Mode::Plan, Self::plan_prompt(prompt, goals))
            .await;

        let mut metadata = self.base_metadata();
        metadata.insert(
            "goals_count".to_string(),
            json!(goals.map_or(0, |g| g.len())),
        );

        let envelope = ResponseEnvelope::new(Mode::Plan, prompt, text, metadata);
        self.record(envelope)
    }
}
