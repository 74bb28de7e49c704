//! Handlers for the `/roles` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roster_core::error::CoreError;
use roster_core::role::{normalize_permissions, CreateRole, Role, UpdateRole};
use roster_core::types::DbId;
use roster_core::validation::check_name;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/roles
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<Vec<Role>>> {
    let roles = state.store.list_roles().await?;
    Ok(Json(roles))
}

/// POST /api/roles
///
/// Create a role. Permission tags are stored as a set. Returns 201 Created.
pub async fn create_role(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRole>,
) -> AppResult<(StatusCode, Json<Role>)> {
    check_name(&input.name).map_err(CoreError::Validation)?;

    let input = CreateRole {
        permissions: normalize_permissions(&input.permissions),
        ..input
    };
    let role = state.store.create_role(&input).await?;

    tracing::info!(role_id = role.id, "Role created");

    Ok((StatusCode::CREATED, Json(role)))
}

/// PUT /api/roles/{id}
///
/// Apply a partial update to a role's name and/or permissions.
pub async fn update_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateRole>,
) -> AppResult<Json<Role>> {
    if let Some(name) = &input.name {
        check_name(name).map_err(CoreError::Validation)?;
    }

    let changes = UpdateRole {
        name: input.name,
        permissions: input.permissions.map(normalize_permissions),
    };

    let role = state
        .store
        .update_role(id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;

    tracing::info!(role_id = id, "Role updated");

    Ok(Json(role))
}

/// DELETE /api/roles/{id}
///
/// Remove a role. Refused with 409 while users are still assigned to it.
pub async fn delete_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_role(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Role", id }));
    }

    tracing::info!(role_id = id, "Role deleted");

    Ok(StatusCode::NO_CONTENT)
}
