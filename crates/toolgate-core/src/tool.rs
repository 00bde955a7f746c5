//! Tool descriptors and the adapter trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ToolFailure, ToolResult};

/// Description of a callable tool as advertised to the model.
///
/// Serializes to `{name, description, input_schema}`, which is the shape the
/// model service expects in its `tools` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Names of the properties listed under `required` in the input schema.
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// A model-issued request to run a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub input: Value,
    /// Correlates the eventual result back into the conversation.
    pub invocation_id: String,
}

impl ToolInvocation {
    pub fn new(
        invocation_id: impl Into<String>,
        tool_name: impl Into<String>,
        input: Value,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            input,
            invocation_id: invocation_id.into(),
        }
    }
}

/// Backend implementation of one tool.
///
/// Implementations are stateless with respect to individual calls and must be
/// safe to invoke concurrently.
#[async_trait]
pub trait ToolAdapter: Send + Sync {
    /// The descriptor advertised for this tool. Must not change over the
    /// adapter's lifetime.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Run the tool with structured input.
    async fn invoke(&self, input: Value) -> ToolResult<Value>;

    fn name(&self) -> &str {
        &self.descriptor().name
    }
}

/// Deserialize tool input into its typed form, mapping any mismatch to
/// [`ToolFailure::InvalidInput`].
pub fn parse_input<T: DeserializeOwned>(input: Value) -> ToolResult<T> {
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|e| ToolFailure::invalid_input(e.to_string()))
}
