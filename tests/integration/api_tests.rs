//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use dc_indexer::{api, config::AppConfig, AppState};

fn app() -> Router {
    let mut config = AppConfig::default();
    config.indexing.articles = vec!["the ".to_string()];
    config.indexing.max_payload_bytes = 4096;
    api::create_router(AppState::new(config))
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, body)
}

const RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:title>The Great Book : a novel.</dc:title>
  <dc:creator>Doe, Jane.</dc:creator>
  <dc:identifier>ISBN 0-306-40615-2</dc:identifier>
  <dc:identifier>http://example.org/a</dc:identifier>
  <dc:description>http://example.org/b</dc:description>
  <dc:description>84.2</dc:description>
  <dc:description>A story.</dc:description>
  <dc:date>2012</dc:date>
  <dc:language>eng und</dc:language>
</oai_dc:dc>"#;

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["filing_articles"], json!(["the "]));
    assert_eq!(body["max_payload_bytes"], 4096);
}

#[tokio::test]
async fn test_index_record() {
    let (status, body) = post(
        "/api/v1/records/index",
        json!({ "data": RECORD, "oai_id": "oai:helka:1234", "source": "helka" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "1234");
    assert_eq!(body["source"], "helka");

    let fields = &body["fields"];
    assert_eq!(fields["ctrlnum"], "1234");
    assert_eq!(fields["title"], "The Great Book : a novel");
    assert_eq!(fields["title_short"], "The Great Book");
    assert_eq!(fields["title_sub"], "a novel");
    assert_eq!(fields["title_sort"], "great book : a novel");
    assert_eq!(fields["author"], "Doe, Jane");
    assert_eq!(fields["isbn"], json!(["9780306406157"]));
    assert_eq!(fields["url"], "http://example.org/b");
    assert_eq!(fields["contents"], json!(["A story"]));
    assert_eq!(fields["language"], json!(["eng"]));
    assert_eq!(fields["publishDate"], "2012");
    assert_eq!(fields["format"], "");
    assert!(fields["fullrecord"]
        .as_str()
        .unwrap()
        .contains("<recordID>1234</recordID>"));
}

#[tokio::test]
async fn test_serialize_record() {
    let (status, body) = post(
        "/api/v1/records/serialize",
        json!({ "data": RECORD, "oai_id": "oai:helka:1234", "source": "helka" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let serialized = body["serialized"].as_str().unwrap();
    assert!(!serialized.contains(">\n"));
    assert!(serialized.ends_with("<recordID>1234</recordID></oai_dc:dc>"));
    assert!(body["xml"].as_str().unwrap().contains("\n  <dc:title>"));
}

#[tokio::test]
async fn test_dedup_record() {
    let (status, body) = post(
        "/api/v1/records/dedup",
        json!({ "data": RECORD, "oai_id": "oai:helka:1234", "source": "helka" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keys"]["main_author"], "Doe, Jane.");
    assert_eq!(body["keys"]["format"], "Other");
    assert_eq!(body["keys"]["publication_year"], "2012");
    assert_eq!(body["keys"]["page_count"], Value::Null);
}

#[tokio::test]
async fn test_malformed_record() {
    let (status, body) = post(
        "/api/v1/records/index",
        json!({ "data": "<dc><title>x</dc>", "oai_id": "oai:helka:1", "source": "helka" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "MalformedRecord");
}

#[tokio::test]
async fn test_missing_identifier() {
    let (status, body) = post(
        "/api/v1/records/index",
        json!({ "data": "<dc><title>x</title></dc>", "oai_id": "helka-1", "source": "helka" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "MissingIdentifier");
}

#[tokio::test]
async fn test_invalid_request() {
    let (status, body) = post(
        "/api/v1/records/index",
        json!({ "data": "", "oai_id": "oai:helka:1", "source": "helka" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}
