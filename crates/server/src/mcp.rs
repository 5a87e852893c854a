//! MCP stdio server exposing the tool set as native tools.
//!
//! Protocol: newline-delimited JSON-RPC 2.0 on stdin/stdout. Logging must
//! go to stderr because stdout carries protocol messages only.

use ak_core::tools::toolset::ToolSet;
use ak_protocol::tool_models::ToolArgs;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "agent-kit";

const PARSE_ERROR: i32 = -32700;
const INVALID_PARAMS: i32 = -32602;
const METHOD_NOT_FOUND: i32 = -32601;
const INTERNAL_ERROR: i32 = -32603;

pub struct McpServer {
    tools: ToolSet,
}

impl McpServer {
    pub fn new(tools: ToolSet) -> Self {
        Self { tools }
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }

    /// Answer every request line from `reader` on `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(tools = self.tools.len(), "mcp stdio server started");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = self.handle_message(line).await;
            // Notifications get no reply.
            if response.is_empty() {
                continue;
            }
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        tracing::info!("mcp stdio server stopped");
        Ok(())
    }

    /// Handle one JSON-RPC message, returning the serialized response or an
    /// empty string for notifications.
    pub async fn handle_message(&self, line: &str) -> String {
        let request: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                return error_response(Value::Null, PARSE_ERROR, &format!("Parse error: {err}"));
            }
        };

        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let method = request
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let params = request.get("params").cloned().unwrap_or_else(|| json!({}));
        tracing::debug!(method, "mcp request");

        match method {
            "initialize" => success_response(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ),
            "tools/list" => success_response(id, json!({ "tools": self.tools.definitions() })),
            "tools/call" => self.handle_tools_call(id, &params).await,
            method if method.starts_with("notifications/") => String::new(),
            _ => error_response(id, METHOD_NOT_FOUND, &format!("Method not found: {method}")),
        }
    }

    async fn handle_tools_call(&self, id: Value, params: &Value) -> String {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let args = match params.get("arguments") {
            None | Some(Value::Null) => ToolArgs::new(),
            Some(Value::Object(args)) => args.clone(),
            Some(_) => {
                return error_response(id, INVALID_PARAMS, "Tool arguments must be an object");
            }
        };

        let result = self.tools.call(name, &args).await;
        let text = match serde_json::to_string_pretty(&result) {
            Ok(text) => text,
            Err(err) => return error_response(id, INTERNAL_ERROR, &err.to_string()),
        };

        success_response(
            id,
            json!({
                "content": [{ "type": "text", "text": text }],
                "isError": !result.success
            }),
        )
    }
}

fn success_response(id: Value, result: Value) -> String {
    json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string()
}

fn error_response(id: Value, code: i32, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
    .to_string()
}
