//! Command search by name pattern

use crate::error::Result;
use crate::shell::{ExecutionRequest, PowerShellRunner};
use crate::tools::{ResponseEnvelope, Tool, ToolCall};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

const NO_MATCHES_MESSAGE: &str = "No commands found matching the search term.";

/// Script matching command names against `*search*`, sorted by name. The
/// search term is interpolated into the script text; the whole text goes
/// through the runner's quote escaping.
fn search_script(search: &str) -> String {
    format!(
        r#"
Get-Command -Name "*{search}*" -ErrorAction SilentlyContinue |
Select-Object Name, CommandType, Version, Source |
Sort-Object Name |
ConvertTo-Json
"#
    )
}

/// Tool searching available commands by substring
pub struct FindCommandsTool {
    runner: Arc<PowerShellRunner>,
}

impl FindCommandsTool {
    pub fn new(runner: Arc<PowerShellRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for FindCommandsTool {
    fn name(&self) -> &str {
        "find_commands"
    }

    fn description(&self) -> &str {
        "Find PowerShell commands matching a search term"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "search": {
                    "type": "string",
                    "description": "Search term for PowerShell commands"
                }
            },
            "required": ["search"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ResponseEnvelope> {
        let search: String = call.get_parameter("search")?;

        let outcome = self
            .runner
            .run(ExecutionRequest::Command(search_script(&search)))
            .await;

        Ok(if outcome.succeeded {
            if outcome.stdout.is_empty() {
                ResponseEnvelope::success(NO_MATCHES_MESSAGE)
            } else {
                ResponseEnvelope::success(outcome.stdout)
            }
        } else {
            ResponseEnvelope::error(format!("Error finding commands: {}", outcome.stderr))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_is_wrapped_in_wildcards() {
        let script = search_script("Item");
        assert!(script.contains(r#"Get-Command -Name "*Item*" -ErrorAction SilentlyContinue"#));
        assert!(script.contains("Sort-Object Name"));
    }

    #[cfg(unix)]
    mod exec {
        use super::*;
        use crate::test_support::{fake_interpreter, SILENT_SHIM};
        use serde_json::json;

        #[tokio::test]
        async fn empty_output_substitutes_canned_message() {
            let (_dir, config) = fake_interpreter(SILENT_SHIM);
            let tool = FindCommandsTool::new(Arc::new(PowerShellRunner::new(config)));

            let envelope = tool
                .execute(ToolCall::new("find_commands", json!({"search": "zzz"})))
                .await
                .unwrap();

            assert!(!envelope.is_error);
            assert_eq!(envelope.text(), "No commands found matching the search term.");
        }
    }
}
