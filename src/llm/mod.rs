//! LLM Provider Clients and Abstractions
//!
//! This module provides the completion provider collaborator used by
//! [`CompletionAgent`](crate::agents::CompletionAgent). Providers hide behind
//! the [`LLMClient`] trait: one system instruction and one user prompt in,
//! completion text or an [`AppError::Provider`](crate::types::AppError) out.
//!
//! # Supported Providers
//!
//! - OpenAI and compatible endpoints (always available)
//! - Ollama (enable the `ollama` feature, on by default)
//!
//! # Example
//!
//! ```ignore
//! use triad::llm::{CompletionRequest, Provider};
//!
//! let client = Provider::from_config(&config.llm, api_key).create_client()?;
//! let text = client
//!     .complete(&CompletionRequest {
//!         system: "Answer briefly.".into(),
//!         prompt: "What is 2+2?".into(),
//!         model: "gpt-3.5-turbo".into(),
//!         temperature: 0.7,
//!         max_tokens: 1024,
//!     })
//!     .await?;
//! ```

/// Core LLM client trait, requests and provider selection.
pub mod client;

pub mod openai;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use client::{CompletionBackend, CompletionRequest, GenerationSettings, LLMClient, Provider};
