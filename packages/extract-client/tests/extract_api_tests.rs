//! Tests for `ExtractClient` against an in-process backend stub.

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use extract_client::{
    ClientConfig, ClientError, ExtractClient, ExtractRequest, FieldType, SchemaMapping,
};

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<(Option<String>, String)>>>,
}

async fn handle(State(stub): State<Stub>, headers: HeaderMap, body: Bytes) -> (StatusCode, String) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.received
        .lock()
        .unwrap()
        .push((content_type, String::from_utf8_lossy(&body).into_owned()));
    (stub.status, stub.body.to_string())
}

/// Start a backend that answers every extract call with `status` / `body`.
async fn spawn_backend(status: StatusCode, body: &'static str) -> (ExtractClient, Stub) {
    let stub = Stub {
        status,
        body,
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/extract", post(handle))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig::for_base_url(format!("http://{addr}")).unwrap();
    (ExtractClient::new(config), stub)
}

fn title_request() -> ExtractRequest {
    let mut schema = SchemaMapping::new();
    schema.insert("title".into(), FieldType::String);
    ExtractRequest {
        page_url: "https://example.com".into(),
        webhook_url: "https://webhook.com".into(),
        schema,
        prompt: "Extract title".into(),
    }
}

#[tokio::test]
async fn test_posts_json_and_returns_job() {
    let (client, stub) = spawn_backend(StatusCode::ACCEPTED, r#"{"jobId":"test-job-id"}"#).await;

    let response = client.extract(&title_request()).await.unwrap();
    assert_eq!(response.job_id, "test-job-id");

    let received = stub.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        r#"{"pageUrl":"https://example.com","webhookUrl":"https://webhook.com","schema":{"title":"string"},"prompt":"Extract title"}"#
    );
}

#[tokio::test]
async fn test_server_error_reports_status() {
    let (client, _stub) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "").await;

    let err = client.extract(&title_request()).await.unwrap_err();
    assert_eq!(err, ClientError::Http { status: 500 });
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_bad_request_uses_server_reason() {
    let (client, _stub) =
        spawn_backend(StatusCode::BAD_REQUEST, r#"{"error":"Invalid webhookUrl format"}"#).await;

    let err = client.extract(&title_request()).await.unwrap_err();
    assert_eq!(err, ClientError::BadRequest("Invalid webhookUrl format".into()));
}

#[tokio::test]
async fn test_bad_request_without_body_uses_fallback() {
    let (client, _stub) = spawn_backend(StatusCode::BAD_REQUEST, "").await;

    let err = client.extract(&title_request()).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid request data");
}

#[tokio::test]
async fn test_bad_request_without_error_field_uses_fallback() {
    let (client, _stub) = spawn_backend(StatusCode::BAD_REQUEST, r#"{"detail":"nope"}"#).await;

    let err = client.extract(&title_request()).await.unwrap_err();
    assert_eq!(err, ClientError::BadRequest("Invalid request data".into()));
}

#[tokio::test]
async fn test_not_found_is_generic_http_error() {
    let (client, _stub) = spawn_backend(StatusCode::NOT_FOUND, r#"{"error":"ignored"}"#).await;

    let err = client.extract(&title_request()).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn test_undecodable_success_body_is_parse_error() {
    let (client, _stub) = spawn_backend(StatusCode::OK, "<html>").await;

    let err = client.extract(&title_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ExtractClient::new(ClientConfig::for_base_url(format!("http://{addr}")).unwrap());
    let err = client.extract(&title_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
}
