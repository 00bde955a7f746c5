//! HTTP transport for the gateway.
//!
//! - `POST /mcp` - JSON-RPC 2.0 endpoint
//! - `GET /health` - liveness plus the number of registered tools
//!
//! # Example
//!
//! ```rust,ignore
//! use toolgate_gateway::{Gateway, GatewayConfig, GatewayServer, default_registry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::from_env()?;
//!     let gateway = Gateway::new(default_registry(&config)?);
//!     GatewayServer::new(gateway).serve(&config.bind_addr()).await?;
//!     Ok(())
//! }
//! ```

use crate::dispatcher::{Gateway, GatewayReply};
use crate::error::{GatewayError, GatewayResult};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub struct GatewayServer {
    gateway: Gateway,
}

impl GatewayServer {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Build the router for this server
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/mcp", post(rpc_endpoint))
            .route("/health", get(health))
            .with_state(self.gateway.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Serve the gateway on the given address until a shutdown signal arrives
    pub async fn serve(self, addr: &str) -> GatewayResult<()> {
        let listener =
            tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|source| GatewayError::Bind {
                    addr: addr.to_string(),
                    source,
                })?;

        info!(
            address = %addr,
            tools = ?self.gateway.registry().tool_names(),
            "Gateway starting"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(toolgate_core::shutdown_signal())
            .await
            .map_err(GatewayError::Serve)
    }
}

/// POST /mcp
async fn rpc_endpoint(
    State(gateway): State<Gateway>,
    body: Result<Json<Value>, JsonRejection>,
) -> GatewayReply {
    match body {
        Ok(Json(body)) => gateway.dispatch(body).await,
        Err(rejection) => {
            debug!(error = %rejection, "Unparseable request body");
            GatewayReply::invalid_request(Value::Null)
        }
    }
}

/// GET /health
async fn health(State(gateway): State<Gateway>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "tools": gateway.registry().len(),
    }))
}
