//! Full help for a named PowerShell command

use crate::error::Result;
use crate::shell::{ExecutionRequest, PowerShellRunner};
use crate::tools::{ResponseEnvelope, Tool, ToolCall};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Script extracting name, synopsis, syntax, description, parameters and
/// examples for the named command. The command is interpolated into the
/// script text; the whole text goes through the runner's quote escaping.
fn help_script(command: &str) -> String {
    format!(
        r#"
$Help = Get-Help {command} -Full
$Output = [PSCustomObject]@{{
  Name = $Help.Name
  Synopsis = $Help.Synopsis
  Syntax = $Help.Syntax | Out-String
  Description = $Help.Description | Out-String
  Parameters = $Help.Parameters.Parameter | ForEach-Object {{
    [PSCustomObject]@{{
      Name = $_.Name
      Type = $_.Type.Name
      Required = $_.Required
      Description = $_.Description | Out-String
    }}
  }}
  Examples = $Help.Examples.Example | ForEach-Object {{
    [PSCustomObject]@{{
      Title = $_.Title
      Code = $_.Code
      Remarks = $_.Remarks | Out-String
    }}
  }}
}}
ConvertTo-Json -InputObject $Output -Depth 5
"#
    )
}

/// Tool returning a structured help record for one command
pub struct GetCommandHelpTool {
    runner: Arc<PowerShellRunner>,
}

impl GetCommandHelpTool {
    pub fn new(runner: Arc<PowerShellRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for GetCommandHelpTool {
    fn name(&self) -> &str {
        "get_command_help"
    }

    fn description(&self) -> &str {
        "Get full help for a PowerShell command (synopsis, syntax, parameters, examples) as JSON"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "PowerShell command to get help for"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ResponseEnvelope> {
        let command: String = call.get_parameter("command")?;

        let outcome = self
            .runner
            .run(ExecutionRequest::Command(help_script(&command)))
            .await;

        Ok(if outcome.succeeded {
            ResponseEnvelope::success(outcome.stdout)
        } else {
            ResponseEnvelope::error(format!("Error retrieving help: {}", outcome.stderr))
        })
    }
}
