//! Tool registry: lookup by name and dispatch

use crate::error::{Result, ToolError};
use crate::tools::{ResponseEnvelope, Tool, ToolCall};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Metadata exposed to the transport for `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Immutable mapping from tool name to handler.
///
/// Built once at startup; registration of a duplicate name is a fatal
/// startup error. Dispatch never lets a handler failure escape: anything
/// that goes wrong inside a tool comes back as an error envelope.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool; fails when the name is already taken
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered { name }.into());
        }

        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Descriptors for the transport's `tools/list`, in registration order
    pub fn definitions(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.parameters_schema(),
            })
            .collect()
    }

    /// Dispatch a call to the named tool.
    ///
    /// `Err(ToolError::NotFound)` is the only error that crosses this
    /// boundary; the transport rejects it before anything is executed.
    /// Handler failures are converted to error envelopes here.
    pub async fn dispatch(
        &self,
        call: ToolCall,
    ) -> std::result::Result<ResponseEnvelope, ToolError> {
        let tool = self.get(&call.name).ok_or_else(|| ToolError::NotFound {
            name: call.name.clone(),
        })?;

        debug!(tool = %call.name, "dispatching tool call");

        match tool.execute(call).await {
            Ok(envelope) => Ok(envelope),
            Err(e) => {
                warn!(error = %e, "tool call failed before execution");
                Ok(ResponseEnvelope::error(e.to_string()))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
