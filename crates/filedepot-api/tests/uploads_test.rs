//! Presigned upload API integration tests.
//!
//! Run with: `cargo test -p filedepot-api --test uploads_test`

mod helpers;

use helpers::{api_path, setup_test_app, url_path};
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_reports_backend() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "local");
}

#[tokio::test]
async fn test_full_upload_lifecycle() {
    let app = setup_test_app().await;
    let client = app.client();

    // Phase 1: request an upload credential.
    let response = client
        .post(&api_path("/files/uploads"))
        .json(&json!({
            "file_name": "report.pdf",
            "content_type": "application/pdf",
            "file_size": 2048,
            "description": "Q1 report"
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let file_id = body["file_id"].as_str().expect("file_id").to_string();
    assert_eq!(file_id.len(), 32);
    assert!(file_id
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["expires_in"], 900);
    assert_eq!(body["headers"]["Content-Type"], "application/pdf");

    let upload_url = body["upload_url"].as_str().expect("upload_url").to_string();
    let download_url = body["download_url"]
        .as_str()
        .expect("download_url")
        .to_string();
    assert!(upload_url.ends_with(&format!("/upload/{}/report.pdf", file_id)));
    assert!(download_url.ends_with(&format!("/{}/report.pdf", file_id)));

    // Confirming before the transfer must report failure, not success.
    let response = client
        .post(&api_path("/files/uploads/confirm"))
        .json(&json!({ "file_id": file_id }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    // Phase 2: out-of-band PUT of the bytes to the credential URL.
    let payload = b"%PDF-1.4 fake report".to_vec();
    let response = client
        .put(url_path(&upload_url))
        .content_type("application/pdf")
        .bytes(payload.clone().into())
        .await;
    assert_eq!(response.status_code(), 200);

    // Phase 3: confirm.
    let response = client
        .post(&api_path("/files/uploads/confirm"))
        .json(&json!({ "file_id": file_id }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["file_url"].as_str().expect("file_url").contains(&file_id));

    // Metadata recovered from storage.
    let response = client.get(&api_path(&format!("/files/{}", file_id))).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["file_id"], file_id.as_str());
    assert_eq!(body["file_name"], "report.pdf");
    assert_eq!(body["file_size"], payload.len() as i64);
    assert!(body["created_at"].as_i64().expect("created_at") > 0);

    // Download serves the exact bytes back.
    let response = client.get(url_path(&download_url)).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), payload.as_slice());

    // Delete, then verify the file is gone and a repeat delete still succeeds.
    let response = client
        .delete(&api_path(&format!("/files/{}", file_id)))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let response = client.get(&api_path(&format!("/files/{}", file_id))).await;
    assert_eq!(response.status_code(), 404);

    let response = client
        .delete(&api_path(&format!("/files/{}", file_id)))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_request_upload_rejects_missing_fields() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/files/uploads"))
        .json(&json!({
            "file_name": "",
            "content_type": "text/plain",
            "file_size": 1
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");

    let response = app
        .client()
        .post(&api_path("/files/uploads"))
        .json(&json!({
            "file_name": "a.txt",
            "content_type": "text/plain",
            "file_size": 0
        }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_request_upload_rejects_oversized_declaration() {
    let app = setup_test_app().await;

    // Test config caps files at 10 MiB.
    let response = app
        .client()
        .post(&api_path("/files/uploads"))
        .json(&json!({
            "file_name": "huge.bin",
            "content_type": "application/octet-stream",
            "file_size": 11 * 1024 * 1024
        }))
        .await;
    assert_eq!(response.status_code(), 413);
    let body: Value = response.json();
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_confirm_nonexistent_file_downgrades_to_failure() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/files/uploads/confirm"))
        .json(&json!({ "file_id": "nonexistent-id" }))
        .await;

    // Downgrade policy: HTTP 200 with success=false, never a hard error.
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("not found"));
    assert!(body.get("file_url").is_none());
}

#[tokio::test]
async fn test_get_info_unknown_id_is_hard_404() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/files/00000000000000000000000000000000"))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_malformed_id_reports_success() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .delete(&api_path("/files/not-a-real-id"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_upload_route_rejects_traversal() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/files/uploads"))
        .json(&json!({
            "file_name": "a.txt",
            "content_type": "text/plain",
            "file_size": 5
        }))
        .await;
    let body: Value = response.json();
    let file_id = body["file_id"].as_str().expect("file_id").to_string();

    // File name segment containing ".." must be rejected by the byte route.
    let response = client
        .put(&format!("/files/upload/{}/..%2Fescape.txt", file_id))
        .bytes(b"data".to_vec().into())
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/api/v1/files/uploads"].is_object());
}
