//! Axum route handlers for the dispatch API.

use ak_core::dispatch::Dispatcher;
use ak_protocol::agent_models::AgentOptions;
use ak_protocol::http_models::{
    AgentListResponse, ChatRequest, ChatResponse, DispatchRequest, DispatchResponse,
    HealthResponse, ToolListResponse,
};
use ak_protocol::tool_models::{ToolArgs, ToolResult};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

pub struct AppState {
    pub dispatcher: Dispatcher,
}

// POST /
//
// Always answers with a chat envelope so the client has something to show,
// even when the body could not be read.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable chat request");
            return Json(ChatResponse::assistant(format!(
                "Could not read the request: {}. {}",
                rejection.body_text(),
                usage_hint(&state.dispatcher)
            )));
        }
    };

    let text = req.last_content().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Json(ChatResponse::assistant(format!(
            "No message received. {}",
            usage_hint(&state.dispatcher)
        )));
    }

    let outcome = state.dispatcher.dispatch(text, AgentOptions::new()).await;
    Json(ChatResponse::assistant(outcome.content()))
}

// POST /dispatch
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DispatchRequest>, JsonRejection>,
) -> (StatusCode, Json<DispatchResponse>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable dispatch request");
            return (
                rejection.status(),
                Json(DispatchResponse::rejected(format!(
                    "Invalid request: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    let outcome = state.dispatcher.dispatch(&req.command, req.options).await;
    (StatusCode::OK, Json(outcome.into_response()))
}

// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        agents: state.dispatcher.registry().names(),
        tools: state.dispatcher.tools().statuses().await,
    })
}

// GET /agents
pub async fn agents(State(state): State<Arc<AppState>>) -> Json<AgentListResponse> {
    Json(AgentListResponse {
        agents: state.dispatcher.agents(),
    })
}

// GET /tools
pub async fn tools(State(state): State<Arc<AppState>>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: state.dispatcher.tools().definitions(),
    })
}

// POST /tools/:name
//
// The body is a JSON object of tool arguments; an empty body means none.
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<ToolResult>) {
    let tools = state.dispatcher.tools();
    if tools.get(&name).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(tools.call(&name, &ToolArgs::new()).await),
        );
    }

    let args = if body.iter().all(u8::is_ascii_whitespace) {
        ToolArgs::new()
    } else {
        match serde_json::from_slice::<ToolArgs>(&body) {
            Ok(args) => args,
            Err(err) => {
                tracing::warn!(tool = %name, error = %err, "unreadable tool arguments");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ToolResult::failure(
                        format!("Invalid arguments: {err}"),
                        "Tool arguments must be a JSON object",
                    )),
                );
            }
        }
    };

    (StatusCode::OK, Json(tools.call(&name, &args).await))
}

fn usage_hint(dispatcher: &Dispatcher) -> String {
    let config = dispatcher.config();
    let example = dispatcher
        .agents()
        .into_iter()
        .find_map(|a| a.commands.into_iter().next())
        .unwrap_or_else(|| "<command>".to_string());
    format!("Try: {} {} {example}", config.mention, config.directive)
}
