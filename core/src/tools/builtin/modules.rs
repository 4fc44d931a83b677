//! Available PowerShell modules

use crate::error::Result;
use crate::shell::{ExecutionRequest, PowerShellRunner};
use crate::tools::{ResponseEnvelope, Tool, ToolCall};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

const LIST_MODULES_SCRIPT: &str = r#"
Get-Module -ListAvailable |
Select-Object Name, Version, ModuleType, Path |
Sort-Object Name |
ConvertTo-Json
"#;

/// Tool listing available modules (name, version, type, path), sorted by name
pub struct ListModulesTool {
    runner: Arc<PowerShellRunner>,
}

impl ListModulesTool {
    pub fn new(runner: Arc<PowerShellRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for ListModulesTool {
    fn name(&self) -> &str {
        "list_modules"
    }

    fn description(&self) -> &str {
        "List available PowerShell modules (name, version, type, path) as JSON"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _call: ToolCall) -> Result<ResponseEnvelope> {
        let outcome = self
            .runner
            .run(ExecutionRequest::Command(LIST_MODULES_SCRIPT.to_string()))
            .await;

        Ok(if outcome.succeeded {
            ResponseEnvelope::success(outcome.stdout)
        } else {
            ResponseEnvelope::error(format!(
                "Error listing PowerShell modules: {}",
                outcome.stderr
            ))
        })
    }
}
