//! Integration tests for the weather service against a mocked upstream

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use toolgate_backends::{WeatherService, WeatherServiceConfig};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPSTREAM_PATH: &str = "/data/2.5/weather";

fn service_with_endpoint(endpoint: String) -> WeatherService {
    let config = WeatherServiceConfig::default()
        .with_api_key("test-key")
        .with_endpoint(endpoint);
    WeatherService::new(config).expect("valid weather config")
}

fn service_for(upstream: &MockServer) -> WeatherService {
    service_with_endpoint(format!("{}{}", upstream.uri(), UPSTREAM_PATH))
}

async fn post_weather(app: Router, body: Body) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/get_weather")
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn location_body(location: &str) -> Body {
    Body::from(json!({ "location": location }).to_string())
}

#[tokio::test]
async fn test_seoul_returns_normalized_report() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("q", "Seoul"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "kr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Seoul",
            "main": {"temp": 18.2, "feels_like": 17.5, "humidity": 55},
            "weather": [{"description": "튼구름"}],
            "wind": {"speed": 2.6}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = service_for(&upstream).router();
    let (status, body) = post_weather(app, location_body("Seoul")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Seoul");
    assert_eq!(body["temperature"], 18.2);
    assert_eq!(body["feels_like"], 17.5);
    assert_eq!(body["description"], "튼구름");
    assert_eq!(body["humidity"], 55);
    assert_eq!(body["wind_speed"], 2.6);
}

#[tokio::test]
async fn test_missing_location_makes_no_upstream_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = service_for(&upstream).router();

    let (status, body) = post_weather(app.clone(), Body::from("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Location is required"}));

    let (status, _) = post_weather(app, Body::from("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_api_key_is_server_error() {
    let upstream = MockServer::start().await;
    let config = WeatherServiceConfig::default()
        .with_endpoint(format!("{}{}", upstream.uri(), UPSTREAM_PATH));
    let app = WeatherService::new(config).unwrap().router();

    let (status, body) = post_weather(app, location_body("Seoul")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Weather API key is not configured");
}

#[tokio::test]
async fn test_upstream_401_reports_invalid_key() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&upstream)
        .await;

    let app = service_for(&upstream).router();
    let (status, body) = post_weather(app, location_body("Seoul")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invalid Weather API key");
}

#[tokio::test]
async fn test_upstream_404_reports_location_not_found() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&upstream)
        .await;

    let app = service_for(&upstream).router();
    let (status, body) = post_weather(app, location_body("Atlantis")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Weather data not found for location: Atlantis");
}

#[tokio::test]
async fn test_other_upstream_status_is_passed_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&upstream)
        .await;

    let app = service_for(&upstream).router();
    let (status, body) = post_weather(app, location_body("Seoul")).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Weather API error:"), "{message}");
    assert!(message.contains("rate limited"), "{message}");
}

#[tokio::test]
async fn test_connection_refused_is_service_unavailable() {
    // Bind then drop to get a local port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = service_with_endpoint(format!("http://{addr}{UPSTREAM_PATH}")).router();
    let (status, body) = post_weather(app, location_body("Seoul")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to connect to Weather API:")
    );
}
