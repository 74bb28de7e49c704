//! `GET /health`, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the store answers, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    fn from_store_ping(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let ping = state.store.ping().await;
    if let Err(e) = &ping {
        tracing::warn!(error = %e, "Store ping failed");
    }
    Json(HealthResponse::from_store_ping(ping.is_ok()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
