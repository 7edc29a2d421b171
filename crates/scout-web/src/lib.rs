//! Scout Web Server
//!
//! Axum-based server for the dashboard page, JSON API, rendered result
//! fragments and WebSocket updates.

pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::{AppState, WebSocketMessage};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/agents", get(routes::dashboard::list_agents))
        .route("/sample-mode", put(routes::dashboard::set_sample_mode))
        .route("/active-tab", put(routes::dashboard::set_active_tab))
        // Workflows
        .route("/{workflow}", get(routes::workflows::get_workflow))
        .route("/{workflow}/form", put(routes::workflows::update_form))
        .route("/{workflow}/submit", post(routes::workflows::submit))
        .route("/{workflow}/retry", post(routes::workflows::retry))
        .route("/{workflow}/cancel", post(routes::workflows::cancel))
        .route("/{workflow}/expand/{index}", post(routes::workflows::toggle_expanded))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api", api_routes)
        .route("/fragments/{workflow}", get(routes::fragments::results_panel))
        .route("/ws", get(websocket::ws_handler))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use scout_core::agent::{AgentEnvelope, AgentInvoker, DATASET_DISCOVERY_ID};
    use scout_core::{Dashboard, ScoutResult};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Answers every call with the same envelope.
    struct FixedInvoker(Value);

    #[async_trait]
    impl AgentInvoker for FixedInvoker {
        async fn invoke(&self, _message: &str, _agent_id: &str) -> ScoutResult<AgentEnvelope> {
            Ok(AgentEnvelope::from_value(self.0.clone()))
        }
    }

    /// Never answers.
    struct HangingInvoker;

    #[async_trait]
    impl AgentInvoker for HangingInvoker {
        async fn invoke(&self, _message: &str, _agent_id: &str) -> ScoutResult<AgentEnvelope> {
            std::future::pending().await
        }
    }

    fn app_with(invoker: impl AgentInvoker + 'static, sample_mode: bool) -> (Router, AppState) {
        let state = AppState::new(Dashboard::new(sample_mode), Arc::new(invoker));
        (create_router(state.clone()), state)
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn wait_settled(state: &AppState) {
        for _ in 0..100 {
            if !state.dashboard.lock().await.is_loading(scout_core::WorkflowKind::Discover) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("workflow never settled");
    }

    #[tokio::test]
    async fn test_index_served() {
        let (app, _) = app_with(HangingInvoker, false);
        let res = app.oneshot(request("GET", "/", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("<title>Scout</title>"));
    }

    #[tokio::test]
    async fn test_dashboard_snapshot() {
        let (app, _) = app_with(HangingInvoker, false);
        let (status, json) = send(&app, request("GET", "/api/dashboard", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sample_mode"], false);
        assert_eq!(json["active_tab"], "match");
        assert_eq!(json["agents"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_workflow_is_404() {
        let (app, _) = app_with(HangingInvoker, false);
        let (status, _) = send(&app, request("POST", "/api/recipes/submit", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_form_is_rejected() {
        let (app, _) = app_with(HangingInvoker, false);
        send(&app, request("PUT", "/api/match/form", Some(json!({ "bio": "NLP", "intent": "collab" })))).await;

        let (status, json) = send(&app, request("POST", "/api/match/submit", None)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["field_errors"], json!({ "name": true }));
        assert_eq!(json["state"]["phase"], "empty");
    }

    #[tokio::test]
    async fn test_unknown_field_is_bad_request() {
        let (app, _) = app_with(HangingInvoker, false);
        let (status, _) = send(&app, request("PUT", "/api/discover/form", Some(json!({ "name": "x" })))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejected_form_edit_changes_nothing() {
        let (app, _) = app_with(HangingInvoker, false);
        let (status, _) = send(&app, request("PUT", "/api/match/form", Some(json!({ "bio": "NLP", "topic": "x" })))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = send(&app, request("GET", "/api/match", None)).await;
        assert_eq!(json["form"]["bio"], "");
    }

    #[tokio::test]
    async fn test_sample_mode_completes_immediately() {
        let (app, state) = app_with(HangingInvoker, false);
        let mut rx = state.tx.subscribe();

        let (_, json) = send(&app, request("PUT", "/api/sample-mode", Some(json!({ "enabled": true })))).await;
        assert_eq!(json["sample_mode"], true);
        assert_eq!(rx.recv().await.unwrap(), WebSocketMessage::SampleModeChanged { enabled: true });

        let (status, json) = send(&app, request("POST", "/api/match/submit", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"]["phase"], "success");
        assert_eq!(json["read_only"], true);
        assert_eq!(json["state"]["result"]["matches"].as_array().unwrap().len(), 4);

        let res = app.clone().oneshot(request("GET", "/fragments/match", None)).await.unwrap();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Dr. Alex Rivera"));
    }

    #[tokio::test]
    async fn test_live_submit_settles_in_background() {
        let envelope = json!({
            "success": true,
            "response": { "result": "```json\n{\"datasets\": [{\"title\": \"ImageNet\", \"relevance_score\": 91}]}\n```" }
        });
        let (app, state) = app_with(FixedInvoker(envelope), false);
        send(&app, request("PUT", "/api/discover/form", Some(json!({ "topic": "Vision" })))).await;

        let (status, json) = send(&app, request("POST", "/api/discover/submit", None)).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["agent_id"], DATASET_DISCOVERY_ID);

        wait_settled(&state).await;
        let (_, json) = send(&app, request("GET", "/api/discover", None)).await;
        assert_eq!(json["state"]["phase"], "success");
        assert_eq!(json["state"]["result"]["datasets"][0]["title"], "ImageNet");

        let (_, json) = send(&app, request("POST", "/api/discover/expand/0", None)).await;
        assert_eq!(json["expanded"], 0);
    }

    #[tokio::test]
    async fn test_agent_failure_text_reaches_snapshot() {
        let (app, state) = app_with(FixedInvoker(json!({ "success": false, "error": "rate limited" })), false);
        send(&app, request("PUT", "/api/discover/form", Some(json!({ "topic": "Vision" })))).await;
        send(&app, request("POST", "/api/discover/submit", None)).await;

        wait_settled(&state).await;
        let (_, json) = send(&app, request("GET", "/api/discover", None)).await;
        assert_eq!(json["state"], json!({ "phase": "error", "message": "rate limited" }));
    }

    #[tokio::test]
    async fn test_cancel_returns_to_empty() {
        let (app, _) = app_with(HangingInvoker, false);
        send(&app, request("PUT", "/api/discover/form", Some(json!({ "topic": "Vision" })))).await;

        let (status, _) = send(&app, request("POST", "/api/discover/submit", None)).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let (_, agents) = send(&app, request("GET", "/api/agents", None)).await;
        assert_eq!(agents[3]["active"], true);

        let (status, json) = send(&app, request("POST", "/api/discover/cancel", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"]["phase"], "empty");

        let (status, _) = send(&app, request("POST", "/api/discover/cancel", None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_switching_tab() {
        let (app, _) = app_with(HangingInvoker, true);
        send(&app, request("POST", "/api/match/submit", None)).await;

        let (status, json) = send(&app, request("PUT", "/api/active-tab", Some(json!({ "workflow": "discover" })))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["active_tab"], "discover");
        assert_eq!(json["matching"]["state"]["phase"], "empty");
    }
}
