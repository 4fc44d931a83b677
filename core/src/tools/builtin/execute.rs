//! Verbatim PowerShell command execution

use crate::error::Result;
use crate::shell::{ExecutionRequest, PowerShellRunner};
use crate::tools::{ResponseEnvelope, Tool, ToolCall};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Tool that runs a caller-supplied PowerShell command as-is
pub struct ExecutePsTool {
    runner: Arc<PowerShellRunner>,
}

impl ExecutePsTool {
    pub fn new(runner: Arc<PowerShellRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for ExecutePsTool {
    fn name(&self) -> &str {
        "execute_ps"
    }

    fn description(&self) -> &str {
        "Execute a PowerShell command and return its output"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "PowerShell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ResponseEnvelope> {
        let command: String = call.get_parameter("command")?;

        let outcome = self.runner.run(ExecutionRequest::Command(command)).await;

        Ok(if outcome.succeeded {
            ResponseEnvelope::success(outcome.stdout)
        } else {
            ResponseEnvelope::error(format!(
                "Error executing PowerShell command: {}",
                outcome.stderr
            ))
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::{fake_interpreter, INTERPRETER_SHIM};
    use serde_json::json;

    fn tool() -> (tempfile::TempDir, ExecutePsTool) {
        let (dir, config) = fake_interpreter(INTERPRETER_SHIM);
        (dir, ExecutePsTool::new(Arc::new(PowerShellRunner::new(config))))
    }

    #[tokio::test]
    async fn stdout_is_returned_verbatim() {
        let (_dir, tool) = tool();

        let envelope = tool
            .execute(ToolCall::new("execute_ps", json!({"command": "echo Hello"})))
            .await
            .unwrap();

        assert!(!envelope.is_error);
        assert_eq!(envelope.text(), "Hello\n");
    }

    #[tokio::test]
    async fn stderr_becomes_prefixed_error() {
        let (_dir, tool) = tool();

        let envelope = tool
            .execute(ToolCall::new(
                "execute_ps",
                json!({"command": "echo boom 1>&2"}),
            ))
            .await
            .unwrap();

        assert!(envelope.is_error);
        assert_eq!(
            envelope.text().trim_end(),
            "Error executing PowerShell command: boom"
        );
    }

    #[tokio::test]
    async fn missing_command_parameter_is_rejected() {
        let (_dir, tool) = tool();

        let result = tool
            .execute(ToolCall::new("execute_ps", json!({})))
            .await;

        assert!(result.is_err());
    }
}
