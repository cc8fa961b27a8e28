//! Integration tests for the weather client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! covering the success payload and every failure class.

use std::time::Duration;

use integration_weather::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample OpenWeatherMap response for testing
fn sample_weather_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 2.3488, "lat": 48.8534 },
        "weather": [
            { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
        ],
        "base": "stations",
        "main": {
            "temp": 18.5,
            "feels_like": 17.9,
            "temp_min": 16.1,
            "temp_max": 19.8,
            "pressure": 1016,
            "humidity": 60
        },
        "visibility": 10000,
        "wind": { "speed": 3.6, "deg": 250 },
        "clouds": { "all": 0 },
        "dt": 1_700_000_000,
        "sys": { "country": "FR", "sunrise": 1_699_996_000, "sunset": 1_700_030_000 },
        "timezone": 3600,
        "id": 2_988_507,
        "name": "Paris",
        "cod": 200
    })
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> OpenWeatherMapClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: "test-key".to_string(),
        timeout_secs: 2,
    };
    #[allow(clippy::expect_used)]
    OpenWeatherMapClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /weather endpoint with the given response
async fn setup_weather_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_current_weather_success() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_weather_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let observation = client.current_weather("Paris").await.unwrap();

    assert_eq!(observation.description, "clear sky");
    assert!((observation.temperature_celsius - 18.5).abs() < f64::EPSILON);
    assert_eq!(observation.humidity, 60);
}

#[tokio::test]
async fn test_request_carries_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Rio de Janeiro"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_weather_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.current_weather("Rio de Janeiro").await.is_ok());
}

#[tokio::test]
async fn test_empty_location_is_still_requested() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "400",
            "message": "Nothing to geocode"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("").await.unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound { ref location, .. } if location.is_empty()));
}

// ============================================================================
// Provider status code
// ============================================================================

#[tokio::test]
async fn test_provider_code_404_is_location_not_found() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Nowhereistan").await.unwrap_err();

    match err {
        WeatherError::LocationNotFound { location, message } => {
            assert_eq!(location, "Nowhereistan");
            assert_eq!(message, "city not found");
        },
        other => unreachable!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_string_200_is_not_success() {
    let mock_server = MockServer::start().await;

    let mut body = sample_weather_response();
    body["cod"] = serde_json::json!("200");
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound { .. }));
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_server_error_is_http_status() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(&mock_server, ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::HttpStatus(503)));
}

#[tokio::test]
async fn test_client_error_is_http_status() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Nowhereistan").await.unwrap_err();
    assert!(matches!(err, WeatherError::HttpStatus(404)));
}

#[tokio::test]
async fn test_unauthorized_is_http_status() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(&mock_server, ResponseTemplate::new(401)).await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::HttpStatus(401)));
}

#[tokio::test]
async fn test_timeout_is_request_failed() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(sample_weather_response())
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::RequestFailed(_)));
}

#[tokio::test]
async fn test_connection_refused_is_request_failed() {
    let config = WeatherConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: 2,
    };
    let client = OpenWeatherMapClient::new(config).unwrap();

    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::RequestFailed(_)));
}

#[tokio::test]
async fn test_request_error_does_not_leak_api_key() {
    let config = WeatherConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: "leaky-key".to_string(),
        timeout_secs: 2,
    };
    let client = OpenWeatherMapClient::new(config).unwrap();

    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(!err.to_string().contains("leaky-key"));
}

// ============================================================================
// Malformed payloads
// ============================================================================

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::ParseError(_)));
}

#[tokio::test]
async fn test_missing_temperature_is_parse_error() {
    let mock_server = MockServer::start().await;

    let mut body = sample_weather_response();
    if let Some(main) = body["main"].as_object_mut() {
        main.remove("temp");
    }
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::ParseError(_)));
}

#[tokio::test]
async fn test_wrong_field_type_is_parse_error() {
    let mock_server = MockServer::start().await;

    let mut body = sample_weather_response();
    body["main"]["temp"] = serde_json::json!("warm");
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::ParseError(_)));
}

#[tokio::test]
async fn test_error_code_with_malformed_main_is_location_not_found() {
    let mock_server = MockServer::start().await;

    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found",
            "main": "x"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.current_weather("Nowhereistan").await.unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound { ref location, .. } if location == "Nowhereistan"));
}

#[tokio::test]
async fn test_integral_float_humidity_is_accepted() {
    let mock_server = MockServer::start().await;

    let mut body = sample_weather_response();
    body["main"]["humidity"] = serde_json::json!(60.0);
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    let observation = client.current_weather("Paris").await.unwrap();
    assert_eq!(observation.humidity, 60);
}
