//! Mock stock quote service.
//!
//! Answers every symbol with the same fixed quote; there is no market data
//! source behind it.

use crate::error::{BackendError, BackendResult};
use axum::{Json, Router, extract::Path, routing::get};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// A stock quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub volume: u64,
}

impl StockQuote {
    /// The fixed quote served for any symbol.
    pub fn mock(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: 100.0,
            change: 1.0,
            percent_change: 1.0,
            volume: 1000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StockService;

impl StockService {
    pub fn new() -> Self {
        Self
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(home))
            .route("/stock/{symbol}", get(get_stock))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on the given address until a shutdown signal arrives.
    pub async fn serve(self, addr: &str) -> BackendResult<()> {
        let listener =
            tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|source| BackendError::Bind {
                    addr: addr.to_string(),
                    source,
                })?;

        info!(address = %addr, "Stock service starting");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(toolgate_core::shutdown_signal())
            .await
            .map_err(BackendError::Serve)
    }
}

/// GET /
async fn home() -> Json<Value> {
    Json(json!({"message": "Stock API server is running"}))
}

/// GET /stock/{symbol}
async fn get_stock(Path(symbol): Path<String>) -> Json<StockQuote> {
    debug!(symbol = %symbol, "Serving mock quote");
    Json(StockQuote::mock(symbol))
}
