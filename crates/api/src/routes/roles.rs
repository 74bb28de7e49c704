//! Route definitions for the `/roles` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// Routes for the `roles` resource, merged under `/api`.
///
/// ```text
/// GET    /roles                   -> list_roles
/// POST   /roles                   -> create_role
/// PUT    /roles/{id}              -> update_role
/// DELETE /roles/{id}              -> delete_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route("/roles/{id}", put(roles::update_role).delete(roles::delete_role))
}
