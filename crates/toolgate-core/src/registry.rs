use crate::error::RegistryError;
use crate::tool::{ToolAdapter, ToolDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum length of a tool name accepted by the model service.
const MAX_TOOL_NAME_LEN: usize = 64;

/// A tool as stored in the registry: its descriptor plus the adapter backing it.
#[derive(Clone)]
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub adapter: Arc<dyn ToolAdapter>,
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.descriptor.name)
            .finish()
    }
}

/// Name-keyed catalogue of tools.
///
/// `list()` returns descriptors in registration order, so repeated listings
/// serialize identically. The registry is built once at startup and shared
/// read-only afterwards.
///
/// # Example
///
/// ```rust,ignore
/// let registry = ToolRegistry::new()
///     .with_tool(Arc::new(WeatherTool::new(weather_url, timeout)?))?
///     .with_tool(Arc::new(StockTool::new(stock_url, timeout)?))?;
///
/// let tool = registry.get("get_current_weather").expect("registered");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool using the builder pattern.
    pub fn with_tool(mut self, adapter: Arc<dyn ToolAdapter>) -> Result<Self, RegistryError> {
        self.register(adapter)?;
        Ok(self)
    }

    /// Register a tool. Its descriptor is captured at this point.
    pub fn register(&mut self, adapter: Arc<dyn ToolAdapter>) -> Result<(), RegistryError> {
        let descriptor = adapter.descriptor().clone();
        validate_tool_name(&descriptor.name)?;

        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateTool {
                name: descriptor.name,
            });
        }

        tracing::debug!(tool = %descriptor.name, "Registered tool");
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            adapter,
        });
        Ok(())
    }

    /// All tool descriptors, in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor.clone()).collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|t| t.descriptor.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn validate_tool_name(name: &str) -> Result<(), RegistryError> {
    let invalid = |reason: &str| RegistryError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.len() > MAX_TOOL_NAME_LEN {
        return Err(invalid("name exceeds 64 characters"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
    {
        return Err(invalid("only ASCII letters, digits, '_' and '-' are allowed"));
    }
    Ok(())
}
