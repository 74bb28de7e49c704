use std::sync::Arc;

use roster_db::EntityStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store sits behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// User and role persistence.
    pub store: Arc<dyn EntityStore>,
}
