//! Deterministic template-backed agent.
//!
//! Produces fixed-shape text around the caller's prompt with no external
//! calls and no randomness, which makes it the default variant and the one
//! used for implicit creation.

use crate::agents::{Agent, AgentProfile};
use crate::types::{AgentKind, Metadata, Mode, ResponseEnvelope};
use async_trait::async_trait;
use serde_json::json;
use std::fmt::Write;
use tracing::debug;

const DEFAULT_DESCRIPTION: &str = "Template agent answering from built-in outlines";

const EXECUTION_STEPS: [&str; 5] = [
    "Preparation and analysis",
    "Detailed planning",
    "Implementation",
    "Monitoring",
    "Evaluation and adjustments",
];

pub struct TemplateAgent {
    profile: AgentProfile,
}

impl TemplateAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_description(name, DEFAULT_DESCRIPTION)
    }

    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            profile: AgentProfile::new(name, description),
        }
    }

    fn render_ask(prompt: &str) -> String {
        format!(
            "Response to: {}\n\nThis is a quick, direct answer to your question.",
            prompt
        )
    }

    fn render_study(prompt: &str, context: Option<&str>) -> String {
        let mut text = format!("In-depth analysis of: {}\n\n", prompt);
        text.push_str("1. CONTEXT:\n   - This topic matters for a solid understanding.\n\n");
        text.push_str(
            "2. DETAILED ANALYSIS:\n   - First aspect: detailed explanation.\n   - Second aspect: relevant insights.\n\n",
        );
        text.push_str("3. EXAMPLES:\n   - A practical example of the concept.\n\n");
        text.push_str("4. CONCLUSIONS:\n   - Summary of the key takeaways.");

        if let Some(context) = context.filter(|c| !c.is_empty()) {
            // Writing to a String cannot fail
            let _ = write!(text, "\n\nPROVIDED CONTEXT: {}", context);
        }

        text
    }

    fn render_plan(prompt: &str, goals: Option<&[String]>) -> String {
        let mut text = format!("Action plan for: {}\n\n", prompt);
        let _ = write!(text, "MAIN OBJECTIVE:\n   - {}\n\n", prompt);

        if let Some(goals) = goals.filter(|g| !g.is_empty()) {
            text.push_str("SPECIFIC GOALS:\n");
            for (i, goal) in goals.iter().enumerate() {
                let _ = writeln!(text, "   {}. {}", i + 1, goal);
            }
            text.push('\n');
        }

        text.push_str("EXECUTION STEPS:\n");
        for (i, step) in EXECUTION_STEPS.iter().enumerate() {
            let _ = writeln!(text, "   {}. {}", i + 1, step);
        }
        text.push('\n');

        text.push_str("ESTIMATED TIMELINE:\n");
        text.push_str("   - Short term: 1-2 weeks\n");
        text.push_str("   - Medium term: 1-3 months\n");
        text.push_str("   - Long term: 3-6 months");

        text
    }
}

#[async_trait]
impl Agent for TemplateAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut AgentProfile {
        &mut self.profile
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Template
    }

    async fn ask(&mut self, prompt: &str) -> ResponseEnvelope {
        debug!(agent = %self.profile.name, mode = "ask", "template response");

        let mut metadata = Metadata::new();
        metadata.insert("processed".to_string(), json!(true));

        let envelope = ResponseEnvelope::new(Mode::Ask, prompt, Self::render_ask(prompt), metadata);
        self.record(envelope)
    }

    async fn study(&mut self, prompt: &str, context: Option<&str>) -> ResponseEnvelope {
        debug!(agent = %self.profile.name, mode = "study", "template response");

        let mut metadata = Metadata::new();
        metadata.insert("depth".to_string(), json!("detailed"));
        metadata.insert("context_provided".to_string(), json!(context.is_some()));

        let envelope = ResponseEnvelope::new(
            Mode::Study,
            prompt,
            Self::render_study(prompt, context),
            metadata,
        );
        self.record(envelope)
    }

    async fn plan(&mut self, prompt: &str, goals: Option<&[String]>) -> ResponseEnvelope {
        debug!(agent = %self.profile.name, mode = "plan", "template response");

        let mut metadata = Metadata::new();
        metadata.insert(
            "goals_count".to_string(),
            json!(goals.map_or(0, |g| g.len())),
        );

        let envelope = ResponseEnvelope::new(
            Mode::Plan,
            prompt,
            Self::render_plan(prompt, goals),
            metadata,
        );
        self.record(envelope)
    }
}
