//! Provider client tests against a mocked HTTP backend.

use serde_json::json;
use std::time::Duration;
use triad::agents::{Agent, CompletionAgent};
use triad::llm::openai::OpenAIClient;
use triad::llm::{CompletionBackend, CompletionRequest, GenerationSettings, LLMClient, Provider};
use triad::types::AppError;
use triad::utils::toml_config::{LlmConfig, ProviderKind};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn request(prompt: &str) -> CompletionRequest {
    CompletionRequest {
        system: "be brief".to_string(),
        prompt: prompt.to_string(),
        model: "gpt-test".to_string(),
        temperature: 0.5,
        max_tokens: 32,
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn openai(server: &MockServer, key: Option<&str>, timeout: Duration) -> OpenAIClient {
    OpenAIClient::new(key.map(str::to_string), server.uri(), timeout).unwrap()
}

// ============= OpenAI-compatible client =============

#[tokio::test]
async fn test_openai_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "max_tokens": 32,
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "2+2?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("4")))
        .expect(1)
        .mount(&server)
        .await;

    let client = openai(&server, Some("sk-test"), Duration::from_secs(5));
    let text = client.complete(&request("2+2?")).await.unwrap();
    assert_eq!(text, "4");
}

#[tokio::test]
async fn test_openai_without_key_sends_no_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("local")))
        .expect(1)
        .mount(&server)
        .await;

    let client = openai(&server, None, Duration::from_secs(5));
    assert_eq!(client.complete(&request("hi")).await.unwrap(), "local");
}

#[tokio::test]
async fn test_openai_api_error_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let client = openai(&server, Some("bad"), Duration::from_secs(5));
    let err = client.complete(&request("hi")).await.unwrap_err();

    match err {
        AppError::Provider(message) => {
            assert!(message.contains("401"));
            assert!(message.contains("Incorrect API key provided"));
            assert!(message.contains("invalid_request_error"));
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_non_json_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = openai(&server, None, Duration::from_secs(5));
    let err = client.complete(&request("hi")).await.unwrap_err();
    assert!(err.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn test_openai_empty_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = openai(&server, None, Duration::from_secs(5));
    let err = client.complete(&request("hi")).await.unwrap_err();
    assert!(matches!(err, AppError::Provider(_)));
}

#[tokio::test]
async fn test_openai_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = openai(&server, None, Duration::from_millis(200));
    let err = client.complete(&request("hi")).await.unwrap_err();
    assert!(err.to_string().contains("timed out"));
}

// ============= Provider selection =============

#[tokio::test]
async fn test_provider_from_config_reaches_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;

    let config = LlmConfig {
        api_base: server.uri(),
        ..LlmConfig::default()
    };
    assert_eq!(config.provider, ProviderKind::OpenAI);

    let provider = Provider::from_config(&config, Some("from-env".to_string()));
    let client = provider.create_client().unwrap();
    assert_eq!(client.provider_name(), "openai");
    assert_eq!(client.complete(&request("x")).await.unwrap(), "ok");
}

#[tokio::test]
async fn test_completion_agent_degrades_on_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = openai(&server, None, Duration::from_secs(5));
    let backend = CompletionBackend::new(std::sync::Arc::new(client), GenerationSettings::default());
    let mut agent = CompletionAgent::new("c", backend);

    let envelope = agent.ask("2+2?").await;
    assert!(
        envelope
            .response_text()
            .starts_with("Error calling completion provider:")
    );
    assert!(envelope.response_text().contains("boom"));
    assert_eq!(agent.history().len(), 1);
}

#[cfg(feature = "ollama")]
#[tokio::test]
async fn test_ollama_server_error_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let provider = Provider::Ollama {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    };
    let client = provider.create_client().unwrap();
    assert_eq!(client.provider_name(), "ollama");

    let err = client.complete(&request("hi")).await.unwrap_err();
    assert!(matches!(err, AppError::Provider(_)));
}
