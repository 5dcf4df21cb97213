//! Shared helpers for API integration tests.
//!
//! `build_test_app` reuses the production router builder so every test
//! exercises the same middleware stack (CORS, request ID, timeout, body
//! limit, panic recovery) the binary uses. Each app gets a fresh temporary
//! media root.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use campusnotes_api::auth::jwt::JwtConfig;
use campusnotes_api::config::ServerConfig;
use campusnotes_api::router::build_router;
use campusnotes_api::state::AppState;

/// Multipart boundary used by [`multipart_body`].
const BOUNDARY: &str = "----campusnotes-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the given media root.
pub fn test_config(media_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_ttl_mins: 15,
            refresh_ttl_days: 7,
        },
    }
}

/// Build the full application router plus the temporary media root backing
/// it. Keep the `TempDir` alive for the duration of the test.
pub fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    let media_dir = TempDir::new().expect("failed to create temp media root");
    let config = test_config(media_dir.path().to_path_buf());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    (build_router(state, &config), media_dir)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    use http_body_util::BodyExt;
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Sign up a fresh user, returning `(access_token, user_id)`.
pub async fn signup(app: &Router, username: &str) -> (String, i64) {
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "username": username,
            "email": format!("{username}@example.edu"),
            "password": "test-password-1",
            "password_confirm": "test-password-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "signup should succeed");

    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    let user_id = json["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Build a `multipart/form-data` body from text fields plus an optional
/// file part. Returns `(content_type, body)`.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, bytes)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}

/// Upload a note through the API, returning the raw response.
pub async fn upload_note(
    app: &Router,
    token: &str,
    title: &str,
    branch: &str,
    year: &str,
    subject: &str,
    file_name: &str,
    file_bytes: &[u8],
) -> Response<Body> {
    let (content_type, body) = multipart_body(
        &[
            ("title", title),
            ("description", "uploaded in a test"),
            ("branch", branch),
            ("year", year),
            ("subject", subject),
        ],
        Some((file_name, file_bytes)),
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/upload-notes")
        .header("content-type", content_type)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Upload a note and return its id, asserting success.
pub async fn upload_note_ok(
    app: &Router,
    token: &str,
    title: &str,
    branch: &str,
    year: &str,
    subject: &str,
) -> i64 {
    let response = upload_note(
        app,
        token,
        title,
        branch,
        year,
        subject,
        "notes.pdf",
        b"%PDF-1.4 test payload",
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "upload should succeed");

    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}
