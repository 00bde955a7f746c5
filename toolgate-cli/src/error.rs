use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Gateway(#[from] toolgate_gateway::GatewayError),

    #[error(transparent)]
    Config(#[from] toolgate_gateway::ConfigError),

    #[error(transparent)]
    Backend(#[from] toolgate_backends::BackendError),

    #[error(transparent)]
    Agent(#[from] toolgate_agent::AgentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
