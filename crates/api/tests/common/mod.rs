#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use roster_db::MemoryStore;
use tower::ServiceExt;

use roster_api::config::{ServerConfig, StoreBackend};
use roster_api::router::build_app_router;
use roster_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The store handle is returned too so tests can inspect what was persisted.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
    };
    (build_app_router(state, &test_config()), store)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Create the "Editor" role used across scenarios and return its id.
pub async fn create_editor_role(app: &Router) -> i64 {
    let response = post_json(
        app,
        "/api/roles",
        serde_json::json!({"name": "Editor", "permissions": ["Read", "Write"]}),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a user "Ana" under `role_id` and return the response JSON.
pub async fn create_ana(app: &Router, role_id: i64) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/users",
        serde_json::json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "secret1",
            "roleId": role_id,
        }),
    )
    .await;
    body_json(response).await
}
