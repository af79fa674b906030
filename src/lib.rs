//! # Triad - Ask/Study/Plan Agent Server
//!
//! A small agent server built in Rust. Every named agent answers prompts in
//! three modes and keeps its own call history in memory.
//!
//! ## Overview
//!
//! Triad can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `triad-server` binary
//! 2. **As a library** - Import the registry and agents into your own project
//!
//! ## Modes
//!
//! | Mode | Input | Output |
//! |------|-------|--------|
//! | `ask` | prompt | direct, concise answer |
//! | `study` | prompt, optional context | sectioned analysis |
//! | `plan` | prompt, optional goals | objective, goals, steps, timeline |
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use triad::AgentRegistry;
//!
//! #[tokio::main]
//! async fn main() -> triad::Result<()> {
//!     let registry = AgentRegistry::new();
//!     registry.create("t1", None)?;
//!
//!     let envelope = registry.ask("t1", "2+2?").await?;
//!     println!("{}", envelope.response_text());
//!
//!     assert_eq!(registry.history("t1").await?.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ### Completion Agents
//!
//! ```rust,ignore
//! use triad::{AgentRegistry, CompletionBackend, GenerationSettings, Provider};
//!
//! let provider = Provider::Ollama {
//!     base_url: "http://localhost:11434".to_string(),
//!     timeout: std::time::Duration::from_secs(60),
//! };
//! let backend = CompletionBackend::new(provider.create_client()?, GenerationSettings::default());
//!
//! let registry = AgentRegistry::builder()
//!     .with_completion_backend(backend)
//!     .build()?;
//! registry.create("gpt", Some(triad::types::AgentKind::Completion))?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |
//!
//! ## Modules
//!
//! - [`agents`] - Agent variants, history and the registry
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line interface and HTTP client
//! - [`llm`] - Completion provider clients
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration loading

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Agent variants, history and the registry.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Core types (envelopes, requests, responses, errors).
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use agents::{Agent, AgentRegistry, AgentRegistryBuilder, CompletionAgent, TemplateAgent};
pub use llm::{CompletionBackend, CompletionRequest, GenerationSettings, LLMClient, Provider};
pub use types::{AppError, Mode, ResponseEnvelope, Result};
pub use utils::toml_config::TriadConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<TriadConfig>,
    /// Live agents keyed by name
    pub registry: Arc<AgentRegistry>,
}

impl AppState {
    pub fn new(config: TriadConfig, registry: AgentRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }
}
