use crate::config::ConfigError;
use thiserror::Error;
use toolgate_core::RegistryError;

/// Result type for gateway startup and serving
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures while assembling or running the gateway.
///
/// Request-level problems never surface here; they become JSON-RPC error
/// responses.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
