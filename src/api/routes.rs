use crate::AppState;
use crate::api::handlers::{agents, history, modes, system};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Build the full application router with middleware applied.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = state.config.server.cors;

    let router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(agent_routes())
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http());

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/agent/create", post(agents::create_agent))
        .route("/agent/list", get(agents::list_agents))
        .route(
            "/agent/{name}",
            get(agents::get_agent).delete(agents::delete_agent),
        )
        .route("/agent/{name}/ask", post(modes::ask))
        .route("/agent/{name}/study", post(modes::study))
        .route("/agent/{name}/plan", post(modes::plan))
        .route(
            "/agent/{name}/history",
            get(history::get_history).delete(history::clear_history),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AgentRegistry;
    use crate::utils::toml_config::TriadConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn app_with_limit(limit: usize) -> Router {
        let mut config = TriadConfig::default();
        config.server.body_limit_bytes = limit;
        create_router(AppState::new(config, AgentRegistry::new()))
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let app = app_with_limit(64);
        let prompt = "x".repeat(256);
        let body = serde_json::json!({ "prompt": prompt }).to_string();

        let response = app.oneshot(post_json("/agent/big/ask", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_agent_routes_wired() {
        let app = app_with_limit(1024);

        let response = app
            .clone()
            .oneshot(post_json("/agent/t1/ask", r#"{"prompt":"hi"}"#.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/agent/list")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"agents": ["t1"], "total": 1}));
    }
}
