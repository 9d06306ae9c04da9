//! Integration tests for the places client (wiremock-based)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_places::{GooglePlacesClient, PlacesClient, PlacesConfig, PlacesError};

fn config_for_mock(base_url: &str) -> PlacesConfig {
    PlacesConfig {
        base_url: base_url.to_string(),
        ..PlacesConfig::for_testing()
    }
}

const fn sample_autocomplete_json() -> &'static str {
    r#"{
        "status": "OK",
        "predictions": [
            {
                "place_id": "ChIJcityhall",
                "description": "Manila City Hall, Padre Burgos Ave, Manila"
            },
            {
                "place_id": "ChIJpostoffice",
                "description": "Manila Central Post Office, Lawton, Manila"
            }
        ]
    }"#
}

const fn sample_details_json() -> &'static str {
    r#"{
        "status": "OK",
        "result": {
            "name": "Manila City Hall",
            "formatted_address": "Padre Burgos Ave, Ermita, Manila",
            "geometry": { "location": { "lat": 14.5995, "lng": 120.9842 } }
        }
    }"#
}

const fn sample_reverse_json() -> &'static str {
    r#"{
        "status": "OK",
        "results": [
            { "formatted_address": "Elliptical Rd, Diliman, Quezon City" }
        ]
    }"#
}

#[tokio::test]
async fn test_autocomplete_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .and(query_param("input", "manila"))
        .and(query_param("radius", "50000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_autocomplete_json()))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let predictions = client.autocomplete("manila").await.unwrap();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].place_id, "ChIJcityhall");
    assert!(predictions[1].description.contains("Post Office"));
}

#[tokio::test]
async fn test_autocomplete_empty_query_makes_no_call() {
    let server = MockServer::start().await;
    // no mock mounted: any request would 404 and fail differently

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let result = client.autocomplete("   ").await;
    assert!(matches!(result, Err(PlacesError::NoResults(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_autocomplete_zero_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "status": "ZERO_RESULTS", "predictions": [] }"#),
        )
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let result = client.autocomplete("qwertyuiop").await;
    assert!(matches!(result, Err(PlacesError::NoResults(_))));
}

#[tokio::test]
async fn test_autocomplete_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let result = client.autocomplete("manila").await;
    match result {
        Err(err @ PlacesError::RequestFailed(_)) => assert!(err.is_retryable()),
        other => unreachable!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_autocomplete_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let result = client.autocomplete("manila").await;
    assert!(matches!(result, Err(PlacesError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_place_details_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "ChIJcityhall"))
        .and(query_param("fields", "geometry,name,formatted_address"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_details_json()))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let place = client.place_details("ChIJcityhall").await.unwrap();
    assert_eq!(place.name, "Manila City Hall");
    assert!((place.location.latitude() - 14.5995).abs() < 1e-9);
}

#[tokio::test]
async fn test_place_details_caches_resolution() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_details_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = PlacesConfig {
        base_url: server.uri(),
        cache_ttl_minutes: 60,
        ..PlacesConfig::for_testing()
    };
    let client = GooglePlacesClient::new(&config).unwrap();

    let first = client.place_details("ChIJcityhall").await.unwrap();
    let second = client.place_details("ChIJcityhall").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_place_details_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "status": "NOT_FOUND" }"#))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let result = client.place_details("ChIJgone").await;
    match result {
        Err(err) => {
            assert!(err.is_not_found());
            assert!(!err.is_retryable());
        }
        Ok(place) => unreachable!("expected an error, got {place:?}"),
    }
}

#[tokio::test]
async fn test_reverse_geocode_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("latlng", "14.676,121.0437"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_reverse_json()))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let address = client.reverse_geocode(14.676, 121.0437).await.unwrap();
    assert_eq!(address, "Elliptical Rd, Diliman, Quezon City");
}

#[tokio::test]
async fn test_reverse_geocode_no_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "status": "ZERO_RESULTS", "results": [] }"#),
        )
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let result = client.reverse_geocode(0.0, 0.0).await;
    assert!(matches!(result, Err(PlacesError::NotFound(_))));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let client = GooglePlacesClient::new(&config).unwrap();

    let result = client.autocomplete("manila").await;
    assert!(matches!(result, Err(PlacesError::ParseError(_))));
}
