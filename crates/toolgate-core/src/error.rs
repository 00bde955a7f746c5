//! Tool execution failures and registry errors.
//!
//! Adapters never let a raw transport error escape: every failure is
//! classified into a [`ToolFailure`] before it reaches the gateway.

use thiserror::Error;

/// Result type for tool adapter operations
pub type ToolResult<T> = Result<T, ToolFailure>;

/// Classified failure returned by a tool adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolFailure {
    /// Required input was missing or malformed. No upstream call was made.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The upstream rejected our credentials (configuration problem).
    #[error("configuration error: {message}")]
    Unauthorized { message: String },

    /// The upstream has no data for the requested target.
    #[error("no data for {target}")]
    NotFound { target: String },

    /// The upstream could not be reached or did not answer in time.
    #[error("upstream unreachable: {message}")]
    Unreachable { message: String },

    /// Any other upstream failure.
    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },
}

/// Coarse classification of a [`ToolFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidInput,
    Unauthorized,
    NotFound,
    Unreachable,
    Upstream,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::NotFound => "not_found",
            FailureKind::Unreachable => "unreachable",
            FailureKind::Upstream => "upstream",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToolFailure {
    /// Create an invalid input failure
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unauthorized (configuration) failure
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a "no data for target" failure
    pub fn not_found(target: impl Into<String>) -> Self {
        Self::NotFound {
            target: target.into(),
        }
    }

    /// Create an unreachable upstream failure
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Create a generic upstream failure
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Classify an upstream HTTP status into a failure.
    ///
    /// `target` names what was looked up (used for 404), `message` carries the
    /// upstream's error text.
    pub fn from_status(status: u16, target: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => Self::invalid_input(message),
            401 | 403 => Self::unauthorized(message),
            404 => Self::not_found(target),
            503 | 504 => Self::unreachable(message),
            _ => Self::upstream(status, message),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ToolFailure::InvalidInput { .. } => FailureKind::InvalidInput,
            ToolFailure::Unauthorized { .. } => FailureKind::Unauthorized,
            ToolFailure::NotFound { .. } => FailureKind::NotFound,
            ToolFailure::Unreachable { .. } => FailureKind::Unreachable,
            ToolFailure::Upstream { .. } => FailureKind::Upstream,
        }
    }
}

/// Errors raised while building a [`crate::ToolRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Tool already registered: {name}")]
    DuplicateTool { name: String },

    #[error("Invalid tool name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}
