//! HTTP host for the tool registry.
//!
//! - `GET /health` runs the `health` tool
//! - `GET /tools` lists every tool with its argument schema
//! - `POST /tools/:name` calls a tool with a JSON arguments object as the body

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use mealplan_tools::{CompositeRegistry, ToolError, ToolErrorKind, ToolInfo, ToolRegistry};

type ToolResponse = Result<Json<Value>, (StatusCode, Json<ToolError>)>;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    registry: Arc<CompositeRegistry>,
}

pub fn app(registry: Arc<CompositeRegistry>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool))
        .layer(CorsLayer::permissive())
        .with_state(AppState { registry })
}

/// Health check endpoint, backed by the `health` tool
async fn health(State(state): State<AppState>) -> ToolResponse {
    run_tool(state, "health".to_string(), Value::Null).await
}

/// Lists every registered tool
async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolInfo>> {
    Json(state.registry.tools())
}

/// Calls one tool by name
///
/// An empty body is treated as no arguments.
///
/// # Errors
/// - `400 Bad Request` for validation failures and malformed bodies
/// - `404 Not Found` for unknown tool names
/// - `500 Internal Server Error` for storage failures
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> ToolResponse {
    let args = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            error_response(ToolError::invalid_arguments(format!("request body: {}", e)))
        })?
    };

    run_tool(state, name, args).await
}

/// Tools do blocking file I/O, so calls run on the blocking pool.
async fn run_tool(state: AppState, name: String, args: Value) -> ToolResponse {
    let result = tokio::task::spawn_blocking(move || state.registry.dispatch(&name, args))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "tool task failed");
            error_response(ToolError::internal("tool task failed"))
        })?;

    result.map(Json).map_err(error_response)
}

fn error_response(err: ToolError) -> (StatusCode, Json<ToolError>) {
    let status = match err.kind {
        ToolErrorKind::ValidationError => StatusCode::BAD_REQUEST,
        ToolErrorKind::UnknownTool => StatusCode::NOT_FOUND,
        ToolErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}
