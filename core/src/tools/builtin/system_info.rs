//! System information via Get-ComputerInfo

use crate::error::Result;
use crate::shell::{ExecutionRequest, PowerShellRunner};
use crate::tools::{ResponseEnvelope, Tool, ToolCall};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Fixed script gathering computer, OS, processor, memory and PowerShell
/// version facts, serialized as JSON by the interpreter.
const SYSTEM_INFO_SCRIPT: &str = r#"
$ComputerInfo = Get-ComputerInfo
$PSVersion = $PSVersionTable

$Output = [PSCustomObject]@{
  ComputerName = $ComputerInfo.CsName
  OSName = $ComputerInfo.WindowsProductName
  OSVersion = $ComputerInfo.OsVersion
  OSBuild = $ComputerInfo.OsBuildNumber
  ProcessorName = $ComputerInfo.CsProcessors.Name
  TotalMemory = "$([math]::Round($ComputerInfo.CsTotalPhysicalMemory / 1GB, 2)) GB"
  PSVersion = "$($PSVersion.PSVersion)"
  PSEdition = "$($PSVersion.PSEdition)"
  PSBuildVersion = "$($PSVersion.BuildVersion)"
  CLRVersion = "$($PSVersion.CLRVersion)"
}

ConvertTo-Json -InputObject $Output -Depth 3
"#;

/// Tool reporting system facts as structured text
pub struct GetSystemInfoTool {
    runner: Arc<PowerShellRunner>,
}

impl GetSystemInfoTool {
    pub fn new(runner: Arc<PowerShellRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for GetSystemInfoTool {
    fn name(&self) -> &str {
        "get_system_info"
    }

    fn description(&self) -> &str {
        "Get system information (computer name, OS, processor, memory, PowerShell version) as JSON"
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
            .run(ExecutionRequest::Command(SYSTEM_INFO_SCRIPT.to_string()))
            .await;

        Ok(if outcome.succeeded {
            ResponseEnvelope::success(outcome.stdout)
        } else {
            ResponseEnvelope::error(format!(
                "Error retrieving system information: {}",
                outcome.stderr
            ))
        })
    }
}
