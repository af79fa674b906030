//! Mock implementations for testing.
//!
//! This module provides a mock LLM client and server builders that can be
//! used across different test files without duplication.
#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use parking_lot::Mutex;
use std::sync::Arc;
use triad::llm::{CompletionBackend, CompletionRequest, GenerationSettings, LLMClient};
use triad::types::{AgentKind, AppError, Result};
use triad::{AgentRegistry, AppState, TriadConfig, api};

/// Mock LLM client for testing with configurable responses.
///
/// Every request is recorded so tests can assert on the exact system
/// instruction and shaped prompt that reached the provider.
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: response.to_string(),
            should_fail: false,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: String::new(),
            should_fail: true,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().push(request.clone());
        if self.should_fail {
            return Err(AppError::Provider("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

pub fn mock_backend(client: Arc<MockLLMClient>) -> CompletionBackend {
    let settings = GenerationSettings {
        model: "mock-model".to_string(),
        ..GenerationSettings::default()
    };
    CompletionBackend::new(client, settings)
}

/// Test server with a template-only registry
pub fn template_server() -> TestServer {
    server_with(AgentRegistry::new())
}

/// Test server whose registry can also build completion agents
pub fn completion_server(client: Arc<MockLLMClient>, default_kind: AgentKind) -> TestServer {
    let registry = AgentRegistry::builder()
        .with_default_kind(default_kind)
        .with_completion_backend(mock_backend(client))
        .build()
        .expect("registry should build");
    server_with(registry)
}

pub fn server_with(registry: AgentRegistry) -> TestServer {
    let state = AppState::new(TriadConfig::default(), registry);
    TestServer::new(api::create_router(state)).expect("Failed to create test server")
}
