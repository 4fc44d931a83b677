//! Stdio JSON-RPC transport
//!
//! Line-delimited JSON-RPC 2.0: one message per line on stdin, one response
//! per request line on stdout. Notifications get no response. All diagnostics
//! go to stderr; stdout carries only protocol frames.

use anyhow::Result;
use powershell_mcp_core::{ToolCall, ToolError, ToolRegistry};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "PowerShell MCP Server";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

fn response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// MCP server over a line-oriented reader/writer pair.
///
/// Calls are served sequentially from the read loop; every request resolves
/// to exactly one response, and per-call failures never escape the loop.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve until the reader reaches EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("{} started and ready for connections", SERVER_NAME);

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(reply) = self.handle_line(line).await {
                let text = serde_json::to_string(&reply)?;
                writer.write_all(text.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw message; `None` means no response is owed
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                return Some(error_response(
                    Value::Null,
                    PARSE_ERROR,
                    &format!("Parse error: {}", e),
                ));
            }
        };

        debug!(method = %request.method, "handling request");

        // Requests without an id are notifications; nothing is owed back.
        let id = request.id?;

        let result = match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({"tools": self.registry.definitions()})),
            "tools/call" => self.handle_tool_call(&request.params).await,
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {}", other))),
        };

        Some(match result {
            Ok(result) => response(id, result),
            Err((code, message)) => error_response(id, code, &message),
        })
    }

    /// Resolve and dispatch one `tools/call` request.
    ///
    /// Unknown tool names are rejected here, before anything executes; the
    /// dispatched tool itself always comes back as a result envelope.
    async fn handle_tool_call(&self, params: &Value) -> std::result::Result<Value, (i64, String)> {
        let name = params
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or((INVALID_PARAMS, "Missing tool name".to_string()))?;

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        match self.registry.dispatch(ToolCall::new(name, arguments)).await {
            Ok(envelope) => {
                serde_json::to_value(envelope).map_err(|e| (INTERNAL_ERROR, e.to_string()))
            }
            Err(e @ ToolError::NotFound { .. }) => {
                warn!(tool = name, "call to unknown tool");
                Err((INVALID_PARAMS, e.to_string()))
            }
            Err(e) => Err((INVALID_PARAMS, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powershell_mcp_core::{builtin_registry, ShellConfig};

    fn server() -> McpServer {
        McpServer::new(builtin_registry(ShellConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let reply = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();

        assert_eq!(reply["id"], 1);
        assert_eq!(reply["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(reply["result"]["serverInfo"]["name"], SERVER_NAME);
        assert!(reply["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn tools_list_exposes_all_six_tools() {
        let reply = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = reply["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 6);
        assert_eq!(tools[0]["name"], "execute_ps");
        assert!(tools[0]["inputSchema"]["properties"]["command"].is_object());
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let reply = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let reply = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#)
            .await
            .unwrap();

        assert_eq!(reply["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let reply = server().handle_line("{not json").await.unwrap();

        assert_eq!(reply["error"]["code"], PARSE_ERROR);
        assert!(reply["id"].is_null());
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected_before_execution() {
        let reply = server()
            .handle_line(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"format_disk","arguments":{}}}"#,
            )
            .await
            .unwrap();

        assert_eq!(reply["error"]["code"], INVALID_PARAMS);
        assert!(reply["error"]["message"]
            .as_str()
            .unwrap()
            .contains("format_disk"));
    }

    #[tokio::test]
    async fn ping_returns_empty_result() {
        let reply = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"ping"}"#)
            .await
            .unwrap();

        assert_eq!(reply["result"], json!({}));
    }

    #[tokio::test]
    async fn serve_answers_each_request_line() {
        let input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\",\"params\":{}}\n\
                      {\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n\
                      {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n";
        let mut output = Vec::new();

        server().serve(&input[..], &mut output).await.unwrap();

        let replies: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["id"], 1);
        assert_eq!(replies[1]["id"], 2);
    }

    #[cfg(unix)]
    mod exec {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        // sh-based stand-in for the interpreter: evaluates -Command text
        fn fake_interpreter() -> (tempfile::TempDir, ShellConfig) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("pwsh");
            std::fs::write(
                &path,
                "#!/bin/sh\nshift\neval \"$1\"\n",
            )
            .unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();

            (dir, ShellConfig::with_program(path.to_string_lossy().into_owned()))
        }

        #[tokio::test]
        async fn tools_call_round_trip() {
            let (_dir, config) = fake_interpreter();
            let server = McpServer::new(builtin_registry(config).unwrap());

            let reply = server
                .handle_line(
                    r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"execute_ps","arguments":{"command":"echo Hello"}}}"#,
                )
                .await
                .unwrap();

            assert_eq!(reply["id"], 7);
            assert_eq!(reply["result"]["content"][0]["text"], "Hello\n");
            assert!(reply["result"].get("isError").is_none());
        }

        #[tokio::test]
        async fn failing_call_is_a_result_with_error_flag() {
            let (_dir, config) = fake_interpreter();
            let server = McpServer::new(builtin_registry(config).unwrap());

            let reply = server
                .handle_line(
                    r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"execute_ps","arguments":{"command":"echo boom 1>&2"}}}"#,
                )
                .await
                .unwrap();

            // Transport-level success: the failure lives in the envelope.
            assert!(reply.get("error").is_none());
            assert_eq!(reply["result"]["isError"], true);
            assert_eq!(
                reply["result"]["content"][0]["text"]
                    .as_str()
                    .unwrap()
                    .trim_end(),
                "Error executing PowerShell command: boom"
            );
        }
    }
}
