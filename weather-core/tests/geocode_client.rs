//! Integration tests for GeocodeClient against a mock upstream.

use weather_core::{Error, GeocodeClient, http_client};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base: &str) -> GeocodeClient {
    GeocodeClient::new(http_client().unwrap(), base, "ops@example.com").unwrap()
}

#[tokio::test]
async fn forward_returns_first_hit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Dallas, TX"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "weather-app/1.0 (ops@example.com)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "32.7767", "lon": "-96.7970", "display_name": "Dallas, Texas" }
        ])))
        .mount(&server)
        .await;

    let got = client(&server.uri()).forward("Dallas, TX").await.unwrap();
    assert_eq!(got, (32.7767, -96.7970));
}

#[tokio::test]
async fn forward_empty_result_is_invalid_input() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let err = client(&server.uri()).forward("nowhere at all").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(err.to_string().contains("nowhere at all"));
}

#[tokio::test]
async fn forward_upstream_failure_is_connectivity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server.uri()).forward("Dallas").await.unwrap_err();
    assert!(matches!(err, Error::Connectivity { .. }));
}

#[tokio::test]
async fn forward_non_numeric_coordinates_are_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "not-a-number", "lon": "-96.7970" }
        ])))
        .mount(&server)
        .await;

    let err = client(&server.uri()).forward("Dallas").await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn forward_missing_coordinate_field_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "display_name": "Dallas, Texas" }
        ])))
        .mount(&server)
        .await;

    let err = client(&server.uri()).forward("Dallas").await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn reverse_returns_display_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "32.7767"))
        .and(query_param("lon", "-96.797"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Dallas, Dallas County, Texas, United States"
        })))
        .mount(&server)
        .await;

    let name = client(&server.uri()).reverse(32.7767, -96.797).await;
    assert_eq!(name, "Dallas, Dallas County, Texas, United States");
}

#[tokio::test]
async fn reverse_falls_back_on_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let name = client(&server.uri()).reverse(32.7767, -96.797).await;
    assert_eq!(name, "32.7767, -96.7970");
}

#[tokio::test]
async fn reverse_falls_back_on_missing_display_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let name = client(&server.uri()).reverse(1.0, 2.0).await;
    assert_eq!(name, "1.0000, 2.0000");
}
