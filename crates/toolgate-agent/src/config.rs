//! # Environment-Based Configuration
//!
//! - `ANTHROPIC_API_KEY` - Model service API key (required)
//! - `ANTHROPIC_MODEL` - Model name (default: `claude-3-opus-20240229`)
//! - `ANTHROPIC_BASE_URL` - Model service base URL (default: `https://api.anthropic.com`)
//! - `ANTHROPIC_MAX_TOKENS` - Completion token limit (default: 1024)
//! - `MCP_SERVER_URL` - Gateway endpoint (default: `http://localhost:8000/mcp`)
//! - `TOOLGATE_SYSTEM_PROMPT` - System prompt for the first completion (default: `You are a helpful assistant.`)
//! - `TOOLGATE_LIST_TIMEOUT_SECS` - `tools/list` timeout (default: 30)
//! - `TOOLGATE_CALL_TIMEOUT_SECS` - `tools/call` timeout (default: 10; must exceed the gateway's
//!   `TOOLGATE_TOOL_TIMEOUT_SECS`)
//! - `TOOLGATE_MODEL_TIMEOUT_SECS` - Model request timeout (default: 120)

use std::time::Duration;
pub use toolgate_core::ConfigError;
use toolgate_core::config::{get_env_parsed, get_env_string, require_env_string, validate_url};

pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000/mcp";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Clone)]
pub struct AgentConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub gateway_url: String,
    pub system_prompt: String,
    pub list_timeout_secs: u64,
    pub call_timeout_secs: u64,
    pub model_timeout_secs: u64,
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("gateway_url", &self.gateway_url)
            .field("list_timeout_secs", &self.list_timeout_secs)
            .field("call_timeout_secs", &self.call_timeout_secs)
            .field("model_timeout_secs", &self.model_timeout_secs)
            .finish()
    }
}

impl AgentConfig {
    /// Config with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            list_timeout_secs: 30,
            call_timeout_secs: 10,
            model_timeout_secs: 120,
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `ANTHROPIC_API_KEY` is unset
    /// or empty, and other `ConfigError`s for malformed values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(require_env_string("ANTHROPIC_API_KEY")?);

        if let Some(model) = get_env_string("ANTHROPIC_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = get_env_string("ANTHROPIC_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(max_tokens) = get_env_parsed::<u32>("ANTHROPIC_MAX_TOKENS")? {
            config.max_tokens = max_tokens;
        }
        if let Some(url) = get_env_string("MCP_SERVER_URL") {
            config.gateway_url = url;
        }
        if let Some(prompt) = get_env_string("TOOLGATE_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        }
        if let Some(timeout) = get_env_parsed::<u64>("TOOLGATE_LIST_TIMEOUT_SECS")? {
            config.list_timeout_secs = timeout;
        }
        if let Some(timeout) = get_env_parsed::<u64>("TOOLGATE_CALL_TIMEOUT_SECS")? {
            config.call_timeout_secs = timeout;
        }
        if let Some(timeout) = get_env_parsed::<u64>("TOOLGATE_MODEL_TIMEOUT_SECS")? {
            config.model_timeout_secs = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_gateway_url(mut self, gateway_url: impl Into<String>) -> Self {
        self.gateway_url = gateway_url.into();
        self
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("ANTHROPIC_BASE_URL", &self.base_url),
            ("MCP_SERVER_URL", &self.gateway_url),
        ] {
            validate_url(name, value)?;
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.list_timeout_secs == 0 || self.call_timeout_secs == 0 || self.model_timeout_secs == 0
        {
            return Err(ConfigError::ValidationError(
                "timeouts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
