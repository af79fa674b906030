use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

// ============= Mode Types =============

/// Response mode an agent answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Direct, concise answer
    Ask,
    /// Deep analysis with examples
    Study,
    /// Structured, actionable plan
    Plan,
}

impl Mode {
    /// All modes in dispatch order
    pub const ALL: [Mode; 3] = [Mode::Ask, Mode::Study, Mode::Plan];

    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Ask => "ask",
            Mode::Study => "study",
            Mode::Plan => "plan",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar metadata attached to a response, keyed by name
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ============= Envelope & History Types =============

/// Result of a single ask/study/plan call.
///
/// Built once per call and never mutated; fields are exposed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    mode: Mode,
    prompt: String,
    #[serde(rename = "response")]
    response_text: String,
    metadata: Metadata,
}

impl ResponseEnvelope {
    pub fn new(
        mode: Mode,
        prompt: impl Into<String>,
        response_text: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            mode,
            prompt: prompt.into(),
            response_text: response_text.into(),
            metadata,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The caller's prompt, exactly as received
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Projection stored in an agent's history (metadata dropped)
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            mode: self.mode,
            prompt: self.prompt.clone(),
            response_text: self.response_text.clone(),
        }
    }
}

/// One past interaction in an agent's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mode: Mode,
    pub prompt: String,
    #[serde(rename = "response")]
    pub response_text: String,
}

// ============= Agent Types =============

/// Which generation strategy backs an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Deterministic local templates
    #[default]
    Template,
    /// External LLM completion provider
    Completion,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Template => "template",
            AgentKind::Completion => "completion",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "template" => Ok(AgentKind::Template),
            "completion" => Ok(AgentKind::Completion),
            other => Err(AppError::InvalidInput(format!(
                "Unknown agent type '{}' (expected 'template' or 'completion')",
                other
            ))),
        }
    }
}

// Case-insensitive, same as the CLI parser
impl<'de> Deserialize<'de> for AgentKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Snapshot of an agent's identity and history size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    pub history_size: usize,
    pub created_at: DateTime<Utc>,
}

// ============= API Request/Response Types =============

fn default_agent_name() -> String {
    "Agent1".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    #[serde(default = "default_agent_name")]
    pub agent_name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AgentKind>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAgentResponse {
    pub message: String,
    pub agent_name: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListAgentsResponse {
    pub agents: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub agent_name: String,
    pub history: Vec<HistoryEntry>,
}

/// Acknowledgement for destructive operations
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub agent_name: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Agent '{0}' already exists")]
    DuplicateName(String),

    #[error("Agent '{0}' not found")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            AppError::DuplicateName(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
