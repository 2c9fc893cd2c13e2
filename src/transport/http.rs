//! HTTP binding: request/response chat, model listing, pull and health.
//!
//! Handlers only decode, call the gateway and encode. Status codes:
//! 400 for bad bodies and invalid queries, 404 when the model must be pulled,
//! 502/504 for backend failures and generation timeouts.

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;

use super::wire::{decode_query, ChatResponse, PullRequest, HTTP_STRATEGIES};
use super::ws::handle_ws_upgrade;
use crate::app::AppState;
use crate::backend::ModelDescriptor;
use crate::gateway::{FailureKind, GatewayResult, Outcome};
use crate::utils::GatewayError;

/// Response body for GET /api/models
#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub available_models: Vec<String>,
    pub current_model: String,
}

/// Status code for a finished cycle
pub fn status_for(result: &GatewayResult) -> StatusCode {
    match result.outcome {
        Outcome::Completed => StatusCode::OK,
        Outcome::InstallSuggested => StatusCode::NOT_FOUND,
        Outcome::Failed(FailureKind::Decode | FailureKind::InvalidQuery) => StatusCode::BAD_REQUEST,
        Outcome::Failed(FailureKind::Timeout) => StatusCode::GATEWAY_TIMEOUT,
        Outcome::Failed(FailureKind::Backend) => StatusCode::BAD_GATEWAY,
        Outcome::Failed(FailureKind::Prompt) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn encode(result: &GatewayResult) -> Response {
    (status_for(result), Json(ChatResponse::from(result))).into_response()
}

async fn handle_root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Ollama Chat Bot API is running" }))
}

async fn handle_models(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let snapshot = state.gateway.registry_snapshot();
    Json(ModelInfoResponse {
        available_models: snapshot.known_models,
        current_model: snapshot.active_model,
    })
}

async fn handle_installed_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelDescriptor>>, (StatusCode, String)> {
    state.gateway.installed_models().await.map(Json).map_err(|e| {
        tracing::error!("Error getting models: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get models".to_string())
    })
}

async fn handle_chat(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match decode_query(&body, HTTP_STRATEGIES) {
        Ok(query) => state.gateway.handle(query).await,
        Err(e) => GatewayResult::failed(&e),
    };
    encode(&result)
}

async fn handle_health(State(state): State<AppState>) -> Response {
    match state.gateway.backend_health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "message": "Server is running and Ollama is available",
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "message": "Ollama service is not available",
                "error": e.to_string(),
            })),
        )
            .into_response(),
    }
}

async fn handle_pull(State(state): State<AppState>, body: Bytes) -> Response {
    let request: PullRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => return pull_error(StatusCode::BAD_REQUEST, "Invalid request format"),
    };

    match state.gateway.pull_model(&request.model_name).await {
        Ok(log) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": format!("Successfully pulled model {}", request.model_name.trim()),
                "details": log,
            })),
        )
            .into_response(),
        Err(e @ GatewayError::InvalidQuery(_)) => {
            pull_error(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            tracing::error!("Error pulling model {}: {}", request.model_name, e);
            pull_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn pull_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": "error", "message": message }))).into_response()
}

/// Build the gateway router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(handle_root))
        .route("/api/models", get(handle_models))
        .route("/api/models/installed-models", get(handle_installed_models))
        .route("/api/models/pull", post(handle_pull))
        .route("/api/chat", post(handle_chat))
        .route("/api/chat/ws", get(handle_ws_upgrade))
        .route("/api/health", get(handle_health))
        .with_state(state)
}

/// Serve on an already bound listener until Ctrl+C / SIGTERM
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gateway stopped");
    Ok(())
}

/// Bind `bind_addr` (e.g. `0.0.0.0:8888`) and serve
pub async fn run_http(state: AppState, bind_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    let snapshot = state.gateway.registry_snapshot();
    let timeouts = state.gateway.backend().timeouts();
    tracing::info!(
        "Server starting on {} (backend={}, model={}, generate_timeout={}s)",
        bind_addr,
        state.gateway.backend().backend_name(),
        snapshot.active_model,
        timeouts.generate.as_secs()
    );
    serve(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
