//! # toolgate Gateway
//!
//! JSON-RPC 2.0 front door for the tool registry. A [`Gateway`] answers
//! `tools/list` with the registered descriptors and routes `tools/call` to the
//! matching [`toolgate_core::ToolAdapter`]; [`GatewayServer`] exposes it over
//! HTTP at `POST /mcp`.
//!
//! The shipped adapters live in [`tools`]: `get_current_weather` (weather
//! service) and `get_stock_data` (stock service).

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod server;
pub mod tools;

pub use config::{ConfigError, GatewayConfig};
pub use dispatcher::{Gateway, GatewayReply};
pub use error::{GatewayError, GatewayResult};
pub use server::GatewayServer;
pub use tools::{KEY_ERROR_MESSAGES, StockTool, WeatherTool, default_registry};
