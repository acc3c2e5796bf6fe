use super::helpers::{InMemoryStore, assert_status, read_json, read_text, send, spawn_app, spawn_app_with_store};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::Value;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

#[tokio::test]
async fn health_reports_reachable_bucket() {
    let app = spawn_app();

    let res = send(&app.app, get("/health")).await;
    assert_status(res.status(), StatusCode::OK);
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["bucket"], "up");
}

#[tokio::test]
async fn health_is_unhealthy_without_bucket() {
    let app = spawn_app_with_store(InMemoryStore::default());

    let res = send(&app.app, get("/health")).await;
    assert_status(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = read_json(res).await;
    assert_eq!(body["bucket"], "missing");
}

#[tokio::test]
async fn upload_page_is_served() {
    let app = spawn_app();

    let res = send(&app.app, get("/")).await;
    assert_status(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = read_text(res).await;
    assert!(html.contains("googleStorage.uploadFile"));
    assert!(html.contains("example-file.txt"));
}

#[tokio::test]
async fn docs_list_both_methods() {
    let app = spawn_app();

    let res = send(&app.app, get("/api/v1/docs")).await;
    assert_status(res.status(), StatusCode::OK);
    let body: Value = read_json(res).await;
    let paths = body["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/api/v1/methods/googleStorage.signFile"));
    assert!(paths.contains_key("/api/v1/methods/googleStorage.uploadFile"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = spawn_app();

    let res = send(&app.app, get("/health")).await;
    assert!(res.headers().contains_key("x-request-id"));
}
