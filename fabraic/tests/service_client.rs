//! End-to-end tests for service clients against a mock Fabraic server.
//!
//! These tests verify that:
//! - Service prefixes and versions are normalized
//! - Path parameters are percent-encoded before hitting the wire
//! - Every service client derived from one root client sends the same auth
//! - Responses decode to JSON values, null, or the right error

use fabraic::{
    ClientError, ConfigError, DecodeError, FabraicClient, FabraicClientBuilder, FabraicError,
    PathParams, RequestOptions,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(
    server: &MockServer,
    build: impl FnOnce(FabraicClientBuilder) -> FabraicClientBuilder,
) -> FabraicClient {
    build(FabraicClient::builder().base_url(server.uri()))
        .build()
        .expect("client should build")
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn construction_fails_without_any_credential() {
    let err = FabraicClient::builder().build().unwrap_err();
    assert!(matches!(err, FabraicError::Config(ConfigError::MissingCredentials)));
}

#[test]
fn access_token_selects_bearer_even_with_api_key() {
    let client = FabraicClient::builder()
        .api_key("key")
        .access_token("token")
        .build()
        .unwrap();

    let headers = client.base_headers();
    assert_eq!(headers.get("authorization").unwrap(), "Bearer token");
    assert!(headers.get("x-api-key").is_none());
}

#[test]
fn service_prefix_is_normalized() {
    let client = FabraicClient::with_api_key("key").unwrap();
    let orders = client.service_with_version("/orders/", "").unwrap();
    assert_eq!(orders.prefix(), "/orders/v1");
}

#[test]
fn blank_service_paths_are_rejected() {
    let client = FabraicClient::with_api_key("key").unwrap();
    assert!(matches!(client.service(""), Err(ConfigError::EmptyServicePath)));
    assert!(matches!(client.service("   "), Err(ConfigError::EmptyServicePath)));
}

#[test]
fn build_path_examples() {
    let client = FabraicClient::with_api_key("key").unwrap();
    let widgets = client.service("catalog").unwrap();

    let spaced = PathParams::from([("id", "a b")]);
    assert_eq!(
        widgets.build_path("/widgets/{id}", &spaced),
        "/catalog/v1/widgets/a%20b"
    );

    let extra = PathParams::new().with("id", 42).with("extra", "x");
    assert_eq!(
        widgets.build_path("/widgets/{id}", &extra),
        "/catalog/v1/widgets/42"
    );
}

// =============================================================================
// Requests over the wire
// =============================================================================

#[tokio::test]
async fn encoded_path_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalog/v1/widgets/a%20b"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, |b| b.api_key("key"));
    let catalog = client.service("catalog").unwrap();

    let value = catalog
        .get("/widgets/{id}", RequestOptions::new().path_param("id", "a b"))
        .await
        .unwrap();

    assert_eq!(value, json!({"a": 1}));
}

#[tokio::test]
async fn sibling_services_share_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("authorization", "Bearer shared-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server, |b| b.access_token("shared-token"));
    let orders = client.service("orders").unwrap();
    let billing = client.service_with_version("billing", "v2").unwrap();

    orders.get("/orders", RequestOptions::new()).await.unwrap();
    billing.get("/invoices", RequestOptions::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths, vec!["/orders/v1/orders", "/billing/v2/invoices"]);

    for request in &requests {
        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Bearer shared-token"
        );
        assert!(request.headers.get("x-api-key").is_none());
    }
}

#[tokio::test]
async fn per_call_header_overrides_only_that_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client(&server, |b| b.api_key("base-key"));
    let svc = client.service("svc").unwrap();

    svc.get("/a", RequestOptions::new().header("X-API-KEY", "other-key"))
        .await
        .unwrap();
    svc.get("/b", RequestOptions::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].headers.get("x-api-key").unwrap(), "other-key");
    assert_eq!(requests[1].headers.get("x-api-key").unwrap(), "base-key");
}

#[tokio::test]
async fn repeated_query_keys_are_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/v1/widgets"))
        .and(query_param("q", "cog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client(&server, |b| b.api_key("key"));
    let search = client.service("search").unwrap();

    search
        .get(
            "/widgets",
            RequestOptions::new()
                .query("q", "cog")
                .query("tag", "red")
                .query("tag", "blue"),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("q=cog&tag=red&tag=blue"));
}

#[tokio::test]
async fn empty_body_returns_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/orders/v1/orders/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client(&server, |b| b.api_key("key"));
    let orders = client.service("orders").unwrap();

    let value = orders
        .delete("/orders/{id}", RequestOptions::new().path_param("id", 1))
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn whitespace_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(" "))
        .mount(&server)
        .await;

    let client = client(&server, |b| b.api_key("key"));
    let orders = client.service("orders").unwrap();

    let err = orders.get("/orders", RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, FabraicError::Decode(DecodeError::Json(_))));
}

#[tokio::test]
async fn not_found_is_http_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"missing"}"#))
        .mount(&server)
        .await;

    let client = client(&server, |b| b.api_key("key"));
    let orders = client.service("orders").unwrap();

    let err = orders
        .get("/orders/{id}", RequestOptions::new().path_param("id", "nope"))
        .await
        .unwrap_err();

    match err {
        FabraicError::Client(ClientError::HttpStatus { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"error":"missing"}"#);
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn unresolved_placeholder_is_sent_literally() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/v1/orders/%7Bid%7D"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, |b| b.api_key("key"));
    let orders = client.service("orders").unwrap();

    let err = orders
        .get("/orders/{id}", RequestOptions::new().path_param("other", 1))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gateway/orders/v1/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("pong")))
        .mount(&server)
        .await;

    let client = FabraicClient::builder()
        .api_key("key")
        .base_url(format!("{}/gateway/", server.uri()))
        .build()
        .unwrap();
    let orders = client.service("orders").unwrap();

    let value = orders.get("ping", RequestOptions::new()).await.unwrap();
    assert_eq!(value, json!("pong"));
}
