use super::helpers::{
    InMemoryStore, TEST_BUCKET, assert_status, call_method, expect_status, read_json, spawn_app,
    spawn_app_with_store,
};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

const UPLOAD: &str = "googleStorage.uploadFile";
const SIGN: &str = "googleStorage.signFile";

fn expires_at(body: &Value) -> DateTime<Utc> {
    body["expiresAt"]
        .as_str()
        .expect("expiresAt missing")
        .parse()
        .expect("expiresAt is not RFC 3339")
}

fn assert_three_hours_from(expiry: DateTime<Utc>, called_at: DateTime<Utc>) {
    let delta = expiry - called_at;
    assert!(
        delta >= chrono::Duration::minutes(180) - chrono::Duration::seconds(5)
            && delta <= chrono::Duration::minutes(180) + chrono::Duration::seconds(5),
        "expiry {expiry} is not 180 minutes after {called_at}"
    );
}

#[tokio::test]
async fn upload_returns_public_and_signed_urls() {
    let app = spawn_app();
    let called_at = Utc::now();

    let res = call_method(
        &app.app,
        UPLOAD,
        json!(["data:text/plain;base64,SGVsbG8=", "a.txt", "text/plain"]),
    )
    .await;
    let res = expect_status(res, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["fileName"], "a.txt");
    assert_eq!(
        body["publicUrl"],
        format!("https://storage.googleapis.com/{}/a.txt", TEST_BUCKET)
    );
    assert!(
        body["signedUrl"]
            .as_str()
            .unwrap()
            .contains("X-Goog-Expires=10800")
    );
    assert_three_hours_from(expires_at(&body), called_at);

    let stored = app.store.object(TEST_BUCKET, "a.txt").expect("object stored");
    assert_eq!(stored.data, b"Hello");
    assert_eq!(stored.content_type, "text/plain");
}

#[tokio::test]
async fn embedded_mime_type_is_not_applied() {
    let app = spawn_app();

    let res = call_method(
        &app.app,
        UPLOAD,
        json!(["data:text/plain;base64,SGVsbG8=", "b.txt", null]),
    )
    .await;
    expect_status(res, StatusCode::OK).await;

    let stored = app.store.object(TEST_BUCKET, "b.txt").unwrap();
    assert_eq!(stored.content_type, "application/octet-stream");
}

#[tokio::test]
async fn raw_base64_upload_without_content_type() {
    let app = spawn_app();

    let res = call_method(&app.app, UPLOAD, json!(["AAEC/w==", "bytes.bin"])).await;
    expect_status(res, StatusCode::OK).await;

    let stored = app.store.object(TEST_BUCKET, "bytes.bin").unwrap();
    assert_eq!(stored.data, vec![0u8, 1, 2, 255]);
    assert_eq!(stored.content_type, "application/octet-stream");
}

#[tokio::test]
async fn malformed_data_url_is_invalid_data() {
    let app = spawn_app();

    let res = call_method(&app.app, UPLOAD, json!(["data:text/plain,Hello", "c.txt", ""])).await;
    assert_status(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;

    assert_eq!(body["error"], "invalid-data");
    assert_eq!(body["message"], "Invalid data format [invalid-data]");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn missing_bucket_fails_without_write() {
    let app = spawn_app_with_store(InMemoryStore::default());

    let res = call_method(&app.app, UPLOAD, json!(["SGVsbG8=", "a.txt", "text/plain"])).await;
    assert_status(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = read_json(res).await;

    assert_eq!(body["error"], "bucket-not-found");
    assert_eq!(
        body["reason"],
        format!("Bucket {} does not exist", TEST_BUCKET)
    );
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn signing_failure_during_upload_is_upload_error() {
    let store = InMemoryStore::with_bucket(TEST_BUCKET);
    store.fail_signing("Cannot sign data without `client_email`");
    let app = spawn_app_with_store(store);

    let res = call_method(&app.app, UPLOAD, json!(["SGVsbG8=", "a.txt", "text/plain"])).await;
    assert_status(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = read_json(res).await;

    assert_eq!(body["error"], "upload-error");
    assert_eq!(body["reason"], "Cannot sign data without `client_email`");
    // The write already happened before signing failed
    assert!(app.store.object(TEST_BUCKET, "a.txt").is_some());
}

#[tokio::test]
async fn concurrent_uploads_to_same_name_both_succeed() {
    let app = spawn_app();

    let (first, second) = tokio::join!(
        call_method(&app.app, UPLOAD, json!(["Zmlyc3Q=", "same.txt", "text/plain"])),
        call_method(&app.app, UPLOAD, json!(["c2Vjb25k", "same.txt", "text/plain"])),
    );
    assert_status(first.status(), StatusCode::OK);
    assert_status(second.status(), StatusCode::OK);

    let stored = app.store.object(TEST_BUCKET, "same.txt").unwrap();
    assert!(stored.data == b"first" || stored.data == b"second");
    assert_eq!(app.store.write_count(), 2);
}

#[tokio::test]
async fn sign_file_returns_url_valid_for_three_hours() {
    let app = spawn_app();
    let called_at = Utc::now();

    let res = call_method(&app.app, SIGN, json!(["example-file.txt"])).await;
    let res = expect_status(res, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["success"], true);
    assert_eq!(
        body["url"],
        format!(
            "https://signed.test/{}/example-file.txt?X-Goog-Expires=10800",
            TEST_BUCKET
        )
    );
    assert_three_hours_from(expires_at(&body), called_at);
}

#[tokio::test]
async fn sign_file_failure_is_google_storage_error() {
    let store = InMemoryStore::with_bucket(TEST_BUCKET);
    store.fail_signing("invalid_grant");
    let app = spawn_app_with_store(store);

    let res = call_method(&app.app, SIGN, json!(["example-file.txt"])).await;
    assert_status(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = read_json(res).await;

    assert_eq!(body["error"], "google-storage-error");
    assert_eq!(body["message"], "invalid_grant [google-storage-error]");
}

#[tokio::test]
async fn unknown_method_is_not_found() {
    let app = spawn_app();

    let res = call_method(&app.app, "googleStorage.deleteFile", json!(["a.txt"])).await;
    assert_status(res.status(), StatusCode::NOT_FOUND);
    let body: Value = read_json(res).await;
    assert_eq!(body["reason"], "Method 'googleStorage.deleteFile' not found");
}

#[tokio::test]
async fn wrong_argument_shapes_are_rejected() {
    let app = spawn_app();

    let res = call_method(&app.app, SIGN, json!([])).await;
    assert_status(res.status(), StatusCode::BAD_REQUEST);

    let res = call_method(&app.app, UPLOAD, json!(["SGVsbG8=", 42])).await;
    assert_status(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body["reason"], "fileName must be a string");

    let res = call_method(&app.app, SIGN, json!({ "fileReference": "a.txt" })).await;
    assert_status(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_upload_is_payload_too_large() {
    let app = spawn_app();
    let file_data = "A".repeat(3 * 1024 * 1024 / 2);

    let res = call_method(&app.app, UPLOAD, json!([file_data, "big.bin"])).await;
    assert_status(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "payload-too-large");
    assert_eq!(
        body["message"],
        "Request body exceeds the upload size limit [payload-too-large]"
    );
    assert_eq!(app.store.write_count(), 0);
}
