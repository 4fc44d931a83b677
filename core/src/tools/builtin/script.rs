//! Script-file execution

use crate::error::Result;
use crate::shell::{ExecutionRequest, PowerShellRunner};
use crate::tools::{ResponseEnvelope, Tool, ToolCall};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

const NO_OUTPUT_MESSAGE: &str = "Script executed successfully with no output.";

/// Tool running a PowerShell script file via `-File`.
///
/// The optional `parameters` string is appended verbatim after the quoted
/// script path, so callers control how their arguments are split and quoted.
pub struct RunScriptTool {
    runner: Arc<PowerShellRunner>,
}

impl RunScriptTool {
    pub fn new(runner: Arc<PowerShellRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for RunScriptTool {
    fn name(&self) -> &str {
        "run_script"
    }

    fn description(&self) -> &str {
        "Run a PowerShell script file, optionally passing parameters"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "scriptPath": {
                    "type": "string",
                    "description": "Path to the PowerShell script file"
                },
                "parameters": {
                    "type": "string",
                    "description": "Optional parameters to pass to the script"
                }
            },
            "required": ["scriptPath"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ResponseEnvelope> {
        let path: String = call.get_parameter("scriptPath")?;
        let parameters: Option<String> = call.get_optional_parameter("parameters")?;

        let outcome = self
            .runner
            .run(ExecutionRequest::Script { path, parameters })
            .await;

        Ok(if outcome.succeeded {
            if outcome.stdout.is_empty() {
                ResponseEnvelope::success(NO_OUTPUT_MESSAGE)
            } else {
                ResponseEnvelope::success(outcome.stdout)
            }
        } else {
            ResponseEnvelope::error(format!("Error running script: {}", outcome.stderr))
        })
    }
}
