//! Agent Registry for managing live agent instances
//!
//! The registry maps agent names to running agents. It is constructed once at
//! startup, shared through [`AppState`](crate::AppState), and dropped at
//! shutdown.
//!
//! ## Locking
//!
//! - The name map sits behind a `parking_lot::RwLock` that is never held
//!   across an `.await`.
//! - Each agent sits behind its own `tokio::sync::Mutex`, held for the whole
//!   mode call, so history order matches call-arrival order per agent while
//!   different agents run in parallel.
//!
//! ## Creation paths
//!
//! [`AgentRegistry::create`] rejects existing names. The mode entry points
//! ([`AgentRegistry::ask`], [`AgentRegistry::study`], [`AgentRegistry::plan`])
//! go through [`AgentRegistry::resolve`], which silently creates unknown
//! agents instead.

use crate::agents::{Agent, CompletionAgent, TemplateAgent};
use crate::llm::CompletionBackend;
use crate::types::{AgentInfo, AgentKind, AppError, HistoryEntry, ResponseEnvelope, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// A registered agent, serialized per instance
pub type SharedAgent = Arc<Mutex<Box<dyn Agent>>>;

/// Registry of live agents keyed by name
pub struct AgentRegistry {
    agents: RwLock<HashMap<String, SharedAgent>>,
    /// Variant used when a create call names none, and for implicit creates
    default_kind: AgentKind,
    /// Required to build completion agents
    completion: Option<CompletionBackend>,
}

impl AgentRegistry {
    /// Create a template-only registry
    pub fn new() -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
            default_kind: AgentKind::Template,
            completion: None,
        }
    }

    pub fn builder() -> AgentRegistryBuilder {
        AgentRegistryBuilder::new()
    }

    pub fn default_kind(&self) -> AgentKind {
        self.default_kind
    }

    /// Whether completion agents can be created
    pub fn supports_completion(&self) -> bool {
        self.completion.is_some()
    }

    fn instantiate(&self, name: &str, kind: AgentKind) -> Result<Box<dyn Agent>> {
        match kind {
            AgentKind::Template => Ok(Box::new(TemplateAgent::new(name))),
            AgentKind::Completion => {
                let backend = self.completion.clone().ok_or_else(|| {
                    AppError::InvalidInput(
                        "Completion agents are unavailable: no completion provider configured"
                            .to_string(),
                    )
                })?;
                Ok(Box::new(CompletionAgent::new(name, backend)))
            }
        }
    }

    /// Register a new agent under `name`.
    ///
    /// Fails with [`AppError::DuplicateName`] when the name is taken; the
    /// existing agent is left untouched.
    pub fn create(&self, name: &str, kind: Option<AgentKind>) -> Result<SharedAgent> {
        let kind = kind.unwrap_or(self.default_kind);
        let mut agents = self.agents.write();

        match agents.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AppError::DuplicateName(name.to_string())),
            Entry::Vacant(slot) => {
                let agent = Arc::new(Mutex::new(self.instantiate(name, kind)?));
                slot.insert(Arc::clone(&agent));
                info!(agent = %name, kind = %kind, "Agent created");
                Ok(agent)
            }
        }
    }

    /// Fetch `name`, creating a default-kind agent if it does not exist yet
    pub fn resolve(&self, name: &str) -> Result<SharedAgent> {
        if let Some(agent) = self.agents.read().get(name) {
            return Ok(Arc::clone(agent));
        }

        let mut agents = self.agents.write();
        // Another caller may have created it between the two locks.
        match agents.entry(name.to_string()) {
            Entry::Occupied(slot) => Ok(Arc::clone(slot.get())),
            Entry::Vacant(slot) => {
                let agent = Arc::new(Mutex::new(self.instantiate(name, self.default_kind)?));
                slot.insert(Arc::clone(&agent));
                info!(agent = %name, kind = %self.default_kind, "Agent created on first use");
                Ok(agent)
            }
        }
    }

    /// Fetch an existing agent
    pub fn get(&self, name: &str) -> Result<SharedAgent> {
        self.agents
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }

    /// Remove an agent and discard its state
    pub fn delete(&self, name: &str) -> Result<()> {
        match self.agents.write().remove(name) {
            Some(_) => {
                info!(agent = %name, "Agent deleted");
                Ok(())
            }
            None => Err(AppError::NotFound(name.to_string())),
        }
    }

    /// All agent names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.agents.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.agents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.read().is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.agents.read().contains_key(name)
    }

    // ============= Operations consumed by the transport layer =============

    pub async fn info(&self, name: &str) -> Result<AgentInfo> {
        let agent = self.get(name)?;
        let guard = agent.lock().await;
        Ok(guard.info())
    }

    pub async fn ask(&self, name: &str, prompt: &str) -> Result<ResponseEnvelope> {
        let agent = self.resolve(name)?;
        let mut guard = agent.lock().await;
        Ok(guard.ask(prompt).await)
    }

    pub async fn study(
        &self,
        name: &str,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<ResponseEnvelope> {
        let agent = self.resolve(name)?;
        let mut guard = agent.lock().await;
        Ok(guard.study(prompt, context).await)
    }

    pub async fn plan(
        &self,
        name: &str,
        prompt: &str,
        goals: Option<&[String]>,
    ) -> Result<ResponseEnvelope> {
        let agent = self.resolve(name)?;
        let mut guard = agent.lock().await;
        Ok(guard.plan(prompt, goals).await)
    }

    pub async fn history(&self, name: &str) -> Result<Vec<HistoryEntry>> {
        let agent = self.get(name)?;
        let guard = agent.lock().await;
        Ok(guard.history().entries())
    }

    pub async fn clear_history(&self, name: &str) -> Result<()> {
        let agent = self.get(name)?;
        let mut guard = agent.lock().await;
        guard.clear_history();
        Ok(())
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating AgentRegistry with fluent API
pub struct AgentRegistryBuilder {
    default_kind: AgentKind,
    completion: Option<CompletionBackend>,
}

impl AgentRegistryBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            default_kind: AgentKind::Template,
            completion: None,
        }
    }

    /// Set the variant used for implicit and untyped creates
    pub fn with_default_kind(mut self, kind: AgentKind) -> Self {
        self.default_kind = kind;
        self
    }

    /// Enable completion agents
    pub fn with_completion_backend(mut self, backend: CompletionBackend) -> Self {
        self.completion = Some(backend);
        self
    }

    /// Build the AgentRegistry
    pub fn build(self) -> Result<AgentRegistry> {
        if self.default_kind == AgentKind::Completion && self.completion.is_none() {
            return Err(AppError::Configuration(
                "Default agent type 'completion' requires a completion provider".into(),
            ));
        }

        Ok(AgentRegistry {
            agents: RwLock::new(HashMap::new()),
            default_kind: self.default_kind,
            completion: self.completion,
        })
    }
}

impl Default for AgentRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
