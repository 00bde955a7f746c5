//! Weather lookup service.
//!
//! `POST /get_weather {"location": "Seoul"}` queries the configured upstream
//! (OpenWeatherMap compatible) and answers with a normalized report:
//!
//! ```json
//! {"location": "Seoul", "temperature": 21.3, "feels_like": 20.9,
//!  "description": "맑음", "humidity": 40, "wind_speed": 3.1}
//! ```
//!
//! Fields the upstream omits come back as `null`.
//!
//! | Condition | Status | `error` |
//! |-----------|--------|---------|
//! | no `location` in body | 400 | `Location is required` |
//! | no API key configured | 500 | `Weather API key is not configured` |
//! | upstream 401 | 500 | `Invalid Weather API key` |
//! | upstream 404 | 404 | `Weather data not found for location: <loc>` |
//! | upstream unreachable / timeout | 503 | `Failed to connect to Weather API: ...` |
//! | other upstream status | same | `Weather API error: ...` |

use crate::config::WeatherServiceConfig;
use crate::error::{BackendError, BackendResult, ErrorBody, WeatherError};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

const USER_AGENT: &str = concat!("toolgate-weather/", env!("CARGO_PKG_VERSION"));

/// Normalized weather report returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Option<String>,
    pub temperature: Option<Number>,
    pub feels_like: Option<Number>,
    pub description: Option<String>,
    pub humidity: Option<Number>,
    pub wind_speed: Option<Number>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamWeather {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    main: Option<UpstreamMain>,
    #[serde(default)]
    weather: Option<Vec<UpstreamCondition>>,
    #[serde(default)]
    wind: Option<UpstreamWind>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamMain {
    #[serde(default)]
    temp: Option<Number>,
    #[serde(default)]
    feels_like: Option<Number>,
    #[serde(default)]
    humidity: Option<Number>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamCondition {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamWind {
    #[serde(default)]
    speed: Option<Number>,
}

impl From<UpstreamWeather> for WeatherReport {
    fn from(upstream: UpstreamWeather) -> Self {
        let main = upstream.main.unwrap_or_default();
        Self {
            location: upstream.name,
            temperature: main.temp,
            feels_like: main.feels_like,
            description: upstream
                .weather
                .and_then(|conditions| conditions.into_iter().next())
                .and_then(|condition| condition.description),
            humidity: main.humidity,
            wind_speed: upstream.wind.and_then(|wind| wind.speed),
        }
    }
}

/// HTTP front for the weather upstream.
#[derive(Clone)]
pub struct WeatherService {
    client: reqwest::Client,
    config: Arc<WeatherServiceConfig>,
}

impl WeatherService {
    /// Create a service with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: WeatherServiceConfig) -> BackendResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Look up the current weather for `location`.
    pub async fn current_weather(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(WeatherError::NotConfigured);
        };

        debug!(location = %location, endpoint = %self.config.endpoint, "Querying weather upstream");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", location),
                ("appid", api_key),
                ("units", self.config.units.as_str()),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(location = %location, error = %e, "Weather upstream unreachable");
                WeatherError::unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                location = %location,
                status = status.as_u16(),
                "Weather upstream returned an error"
            );
            return Err(match status.as_u16() {
                401 => WeatherError::InvalidApiKey,
                404 => WeatherError::not_found(location),
                code => WeatherError::upstream(code, format!("{status}: {}", body.trim())),
            });
        }

        let upstream: UpstreamWeather = response
            .json()
            .await
            .map_err(|e| WeatherError::internal(format!("malformed upstream body: {e}")))?;

        Ok(WeatherReport::from(upstream))
    }

    /// Build the service router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/get_weather", post(get_weather))
            .with_state(self.clone())
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

        if self.config.api_key.is_none() {
            warn!("WEATHER_API_KEY is not set; lookups will fail until it is configured");
        }
        info!(address = %addr, units = %self.config.units, lang = %self.config.lang, "Weather service starting");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(toolgate_core::shutdown_signal())
            .await
            .map_err(BackendError::Serve)
    }
}

/// Wrapper for weather errors that implements IntoResponse
struct WeatherErrorResponse(WeatherError);

impl From<WeatherError> for WeatherErrorResponse {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WeatherErrorResponse {
    fn into_response(self) -> Response {
        if let WeatherError::Internal { message } = &self.0 {
            error!(error = %message, "Weather lookup failed");
        }
        (self.0.status_code(), Json(ErrorBody::from(&self.0))).into_response()
    }
}

/// POST /get_weather
async fn get_weather(
    State(service): State<WeatherService>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WeatherReport>, WeatherErrorResponse> {
    let location = body
        .ok()
        .and_then(|Json(body)| {
            body.get("location")
                .and_then(Value::as_str)
                .filter(|location| !location.trim().is_empty())
                .map(str::to_string)
        })
        .ok_or(WeatherError::MissingLocation)?;

    let report = service.current_weather(&location).await?;
    Ok(Json(report))
}
