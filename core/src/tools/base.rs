//! Base tool trait and the response envelope

use crate::error::{Result, ToolError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for all tools exposed to MCP callers
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool
    fn name(&self) -> &str;

    /// Human-readable description shown to callers
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with validated parameters.
    ///
    /// Subprocess failures are reported inside the returned envelope; an
    /// `Err` here means the call itself was malformed (missing parameter)
    /// and is folded into an error envelope by the registry.
    async fn execute(&self, call: ToolCall) -> Result<ResponseEnvelope>;
}

/// A call to a tool, with parameters already decoded from the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub name: String,

    /// Named arguments as a JSON object
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new<S: Into<String>>(name: S, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Get a required parameter by key
    pub fn get_parameter<T>(&self, key: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let value = self
            .arguments
            .get(key)
            .ok_or_else(|| ToolError::InvalidParameters {
                message: format!("Missing parameter: {}", key),
            })?;

        serde_json::from_value(value.clone()).map_err(|_| {
            ToolError::InvalidParameters {
                message: format!("Invalid parameter type for: {}", key),
            }
            .into()
        })
    }

    /// Get an optional parameter by key; absent or null yields `None`
    pub fn get_optional_parameter<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.arguments.get(key) {
            None => Ok(None),
            Some(value) if value.is_null() => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|_| {
                ToolError::InvalidParameters {
                    message: format!("Invalid parameter type for: {}", key),
                }
                .into()
            }),
        }
    }
}

/// One block of response content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// The uniform success/error wrapper returned for every call.
///
/// Serializes to the MCP tool-result shape: `isError` is omitted when false,
/// so callers must check the flag rather than inspect content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub content: Vec<ContentBlock>,

    #[serde(rename = "isError", default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl ResponseEnvelope {
    /// Create a success envelope with a single text block
    pub fn success<S: Into<String>>(text: S) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Create an error envelope with a single text block
    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Text of the first content block
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => text,
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error_flag() {
        let envelope = ResponseEnvelope::success("Hello");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "Hello"}]})
        );
    }

    #[test]
    fn error_envelope_carries_flag() {
        let envelope = ResponseEnvelope::error("boom");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "content": [{"type": "text", "text": "boom"}],
                "isError": true
            })
        );
    }

    #[test]
    fn required_parameter_extraction() {
        let call = ToolCall::new("execute_ps", json!({"command": "Get-Date"}));
        let command: String = call.get_parameter("command").unwrap();
        assert_eq!(command, "Get-Date");

        assert!(call.get_parameter::<String>("missing").is_err());
    }

    #[test]
    fn optional_parameter_extraction() {
        let call = ToolCall::new(
            "run_script",
            json!({"scriptPath": "/tmp/x.ps1", "parameters": "-Force"}),
        );

        let parameters: Option<String> = call.get_optional_parameter("parameters").unwrap();
        assert_eq!(parameters.as_deref(), Some("-Force"));

        let absent: Option<String> = call.get_optional_parameter("absent").unwrap();
        assert!(absent.is_none());

        let call = ToolCall::new("run_script", json!({"parameters": null}));
        let null: Option<String> = call.get_optional_parameter("parameters").unwrap();
        assert!(null.is_none());
    }
}
