//! Unit tests for the registry client

use super::*;

use std::time::Duration;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config() -> FetchConfig {
    FetchConfig {
        timeout: Duration::from_millis(500),
        max_retries: 2,
        retry_delay: Duration::from_millis(10),
    }
}

fn search_body() -> serde_json::Value {
    serde_json::json!({
        "objects": [
            {
                "package": {
                    "name": "@acme/cli",
                    "scope": "acme",
                    "version": "1.2.0",
                    "description": "Acme command line",
                    "keywords": ["cli"],
                    "date": "2024-01-01T00:00:00.000Z"
                }
            }
        ],
        "total": 1,
        "time": "2024-01-02T00:00:00.000Z"
    })
}

#[test]
fn test_fetch_config_default() {
    let config = FetchConfig::default();
    assert_eq!(config.timeout, Duration::from_millis(10_000));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.retry_delay, Duration::from_millis(1_000));
}

#[test]
fn test_encode_package_name() {
    // Regular package
    assert_eq!(encode_package_name("lodash"), "lodash");

    // Scoped package
    assert_eq!(encode_package_name("@types/node"), "@types%2fnode");
}

#[test]
fn test_search_url_encodes_query() {
    let client = RegistryClient::new().unwrap();
    let url = client.search_url("@acme").unwrap();

    assert_eq!(url.path(), "/-/v1/search");
    assert_eq!(url.query(), Some("text=%40acme"));
}

#[test]
fn test_package_url_scoped() {
    let client = RegistryClient::new().unwrap();

    assert_eq!(
        client.package_url("@acme/cli"),
        "https://registry.npmjs.org/@acme%2fcli"
    );
    assert_eq!(
        client.package_url("lodash"),
        "https://registry.npmjs.org/lodash"
    );
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client =
        RegistryClient::with_base_url("https://registry.example.com/", FetchConfig::default())
            .unwrap();

    assert_eq!(
        client.package_url("lodash"),
        "https://registry.example.com/lodash"
    );
}

#[tokio::test]
async fn test_search_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .and(query_param("text", "@acme"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&mock_server)
        .await;

    let client = RegistryClient::with_base_url(&mock_server.uri(), fast_config()).unwrap();
    let response = client.search("@acme").await.unwrap();

    assert_eq!(response.objects.len(), 1);
    assert_eq!(response.objects[0].package.name, "@acme/cli");
    assert_eq!(response.total, Some(1));
}

#[tokio::test]
async fn test_search_invalid_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "unexpected": true })),
        )
        .mount(&mock_server)
        .await;

    let client = RegistryClient::with_base_url(&mock_server.uri(), fast_config()).unwrap();
    let result = client.search("@acme").await;

    match result.unwrap_err() {
        BinscopeError::InvalidResponseFormat { .. } => {}
        other => panic!("Expected InvalidResponseFormat, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_retries_then_succeeds() {
    let mock_server = MockServer::start().await;

    // First two attempts fail with a server error, the third succeeds
    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&mock_server)
        .await;

    let client = RegistryClient::with_base_url(&mock_server.uri(), fast_config()).unwrap();
    let response = client.search("@acme").await.unwrap();

    assert_eq!(response.objects.len(), 1);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3, "two failed attempts plus the success");
}

#[tokio::test]
async fn test_fetch_fails_after_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = RegistryClient::with_base_url(&mock_server.uri(), fast_config()).unwrap();
    let result = client.search("@acme").await;

    // max_retries = 2 means three attempts total, last error propagates
    match result.unwrap_err() {
        BinscopeError::Status { status, .. } => assert_eq!(status, 503),
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_retries_on_timeout() {
    let mock_server = MockServer::start().await;

    // First two attempts stall past the per-attempt timeout
    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body())
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/-/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&mock_server)
        .await;

    let config = FetchConfig {
        timeout: Duration::from_millis(100),
        max_retries: 2,
        retry_delay: Duration::from_millis(10),
    };
    let client = RegistryClient::with_base_url(&mock_server.uri(), config).unwrap();
    let response = client.search("@acme").await.unwrap();

    assert_eq!(response.objects.len(), 1);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_timeout_error_after_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&mock_server)
        .await;

    let config = FetchConfig {
        timeout: Duration::from_millis(50),
        max_retries: 1,
        retry_delay: Duration::from_millis(10),
    };
    let client = RegistryClient::with_base_url(&mock_server.uri(), config).unwrap();
    let url = format!("{}/slow", mock_server.uri());
    let result = client.fetch_json(&url).await;

    match result.unwrap_err() {
        BinscopeError::Timeout { timeout_ms, .. } => assert_eq!(timeout_ms, 50),
        other => panic!("Expected Timeout error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_package_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/@acme%2fmissing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = RegistryClient::with_base_url(&mock_server.uri(), fast_config()).unwrap();
    let result = client.fetch_package("@acme/missing").await;

    match result.unwrap_err() {
        BinscopeError::Status { status, .. } => assert_eq!(status, 404),
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_package_returns_raw_document() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "name": "@acme/cli",
        "dist-tags": { "latest": "1.2.0" },
        "versions": {
            "1.2.0": {
                "name": "@acme/cli",
                "version": "1.2.0",
                "bin": { "acme": "./bin/cli.js" }
            }
        },
        "readme": "# acme"
    });

    Mock::given(method("GET"))
        .and(path("/@acme%2fcli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let client = RegistryClient::with_base_url(&mock_server.uri(), fast_config()).unwrap();
    let (document, raw) = client.fetch_package("@acme/cli").await.unwrap();

    assert_eq!(document.name.as_deref(), Some("@acme/cli"));
    let tags = document.dist_tags.unwrap();
    assert_eq!(tags.get("latest").map(String::as_str), Some("1.2.0"));
    // Fields outside the typed view survive in the raw document
    assert_eq!(raw["readme"], "# acme");
}
