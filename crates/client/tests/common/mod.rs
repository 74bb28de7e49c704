#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use roster_api::config::{ServerConfig, StoreBackend};
use roster_api::router::build_app_router;
use roster_api::state::AppState;
use roster_client::{ClientConfig, HttpGateway};
use roster_core::role::{CreateRole, Role};
use roster_core::user::{CreateUser, User};
use roster_client::DataGateway;
use roster_db::MemoryStore;

fn server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        store_backend: StoreBackend::Memory,
        database_url: None,
    }
}

/// Serve the real router over a fresh in-memory store on an ephemeral port
/// and return a gateway pointed at it.
pub async fn spawn_server() -> HttpGateway {
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
    };
    let app = build_app_router(state, &server_config());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    gateway_for(&format!("http://{addr}/api"), Duration::from_secs(5))
}

pub fn gateway_for(base_url: &str, timeout: Duration) -> HttpGateway {
    HttpGateway::new(&ClientConfig {
        base_url: base_url.to_string(),
        request_timeout: timeout,
    })
    .expect("build gateway")
}

pub async fn create_editor(gateway: &HttpGateway) -> Role {
    gateway
        .create_role(&CreateRole {
            name: "Editor".to_string(),
            permissions: vec!["Read".to_string(), "Write".to_string()],
        })
        .await
        .expect("create role")
}

pub async fn create_ana(gateway: &HttpGateway, role_id: i64) -> User {
    gateway
        .create_user(&CreateUser {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password: "secret1".to_string(),
            role_id,
        })
        .await
        .expect("create user")
}
