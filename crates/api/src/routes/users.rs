//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes for the `users` resource, merged under `/api`.
///
/// ```text
/// GET    /users                   -> list_users
/// POST   /users                   -> create_user
/// PUT    /users/{id}              -> update_user
/// DELETE /users/{id}              -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", put(users::update_user).delete(users::delete_user))
}
