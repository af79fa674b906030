//! Agents and the ask/study/plan dispatch contract.
//!
//! Every agent variant implements [`Agent`]. The variant is chosen once, at
//! construction, by the [`AgentRegistry`]:
//!
//! - [`TemplateAgent`] assembles deterministic text locally.
//! - [`CompletionAgent`] delegates to an [`LLMClient`](crate::llm::LLMClient).
//!
//! A successful mode call always appends exactly one entry to the agent's
//! [`HistoryLog`] before returning its envelope.

pub mod completion;
pub mod history;
pub mod registry;
pub mod template;

use crate::types::{AgentInfo, AgentKind, ResponseEnvelope};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use completion::CompletionAgent;
pub use history::HistoryLog;
pub use registry::{AgentRegistry, AgentRegistryBuilder, SharedAgent};
pub use template::TemplateAgent;

/// Identity and history shared by every agent variant
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub history: HistoryLog,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
            history: HistoryLog::new(),
        }
    }
}

/// Mode dispatcher implemented by every agent variant.
///
/// Mode calls never fail: template agents are total, completion agents turn
/// provider failures into response text.
#[async_trait]
pub trait Agent: Send + Sync {
    fn profile(&self) -> &AgentProfile;

    fn profile_mut(&mut self) -> &mut AgentProfile;

    fn kind(&self) -> AgentKind;

    /// Single-turn direct answer
    async fn ask(&mut self, prompt: &str) -> ResponseEnvelope;

    /// Deep analysis, optionally grounded in caller-supplied context
    async fn study(&mut self, prompt: &str, context: Option<&str>) -> ResponseEnvelope;

    /// Structured plan, optionally targeting explicit goals
    async fn plan(&mut self, prompt: &str, goals: Option<&[String]>) -> ResponseEnvelope;

    fn name(&self) -> &str {
        &self.profile().name
    }

    fn description(&self) -> &str {
        &self.profile().description
    }

    fn history(&self) -> &HistoryLog {
        &self.profile().history
    }

    fn clear_history(&mut self) {
        self.profile_mut().history.clear();
    }

    /// Append the envelope's history entry and hand the envelope back
    fn record(&mut self, envelope: ResponseEnvelope) -> ResponseEnvelope {
        self.profile_mut().history.append(
            envelope.mode(),
            envelope.prompt(),
            envelope.response_text(),
        );
        envelope
    }

    fn info(&self) -> AgentInfo {
        let profile = self.profile();
        AgentInfo {
            name: profile.name.clone(),
            description: profile.description.clone(),
            kind: self.kind(),
            history_size: profile.history.len(),
            created_at: profile.created_at,
        }
    }
}
