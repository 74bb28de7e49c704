pub mod health;
pub mod roles;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                           list, create
/// /users/{id}                                      update, delete
///
/// /roles                                           list, create
/// /roles/{id}                                      update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(roles::router())
}
