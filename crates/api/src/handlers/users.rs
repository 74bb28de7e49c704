//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roster_core::error::CoreError;
use roster_core::types::DbId;
use roster_core::user::{CreateUser, UpdateUser, User};
use roster_core::validation::check_name;
use roster_db::models::user::{NewUser, UserChanges};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::password::hash_password;
use crate::state::AppState;

/// GET /api/users
///
/// List all users with their resolved role.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// POST /api/users
///
/// Create a user. The password is hashed before it is stored; `status`
/// starts as `active`. Returns 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    check_name(&input.name).map_err(CoreError::Validation)?;

    let new_user = NewUser {
        name: input.name,
        email: input.email,
        password_hash: hash(&input.password)?,
        role_id: input.role_id,
    };

    let user = state.store.create_user(&new_user).await?;

    tracing::info!(user_id = user.id, role_id = user.role_id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
///
/// Apply a partial update. Fields absent from the body are left unchanged.
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<User>> {
    if let Some(name) = &input.name {
        check_name(name).map_err(CoreError::Validation)?;
    }

    let changes = UserChanges {
        name: input.name,
        email: input.email,
        password_hash: input.password.as_deref().map(hash).transpose()?,
        status: input.status,
        role_id: input.role_id,
    };

    let user = state
        .store
        .update_user(id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(user))
}

/// DELETE /api/users/{id}
///
/// Remove a user. Returns 204 No Content; a missing id is 404.
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_user(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}
