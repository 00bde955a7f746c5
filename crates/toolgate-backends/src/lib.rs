//! # toolgate Backends
//!
//! The HTTP services that sit behind the gateway's tools:
//!
//! - [`WeatherService`]: `POST /get_weather`, proxies an OpenWeatherMap-compatible upstream
//! - [`StockService`]: `GET /stock/{symbol}`, serves a fixed mock quote
//!
//! Both are stateless and expose a `router()` for in-process testing and a
//! `serve(addr)` for running standalone.

pub mod config;
pub mod error;
pub mod stock;
pub mod weather;

pub use config::{ConfigError, StockServiceConfig, WeatherServiceConfig};
pub use error::{BackendError, BackendResult, ErrorBody, WeatherError};
pub use stock::{StockQuote, StockService};
pub use weather::{WeatherReport, WeatherService};
