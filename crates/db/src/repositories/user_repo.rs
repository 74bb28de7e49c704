//! Repository for the `users` table.
//!
//! Reads come back joined with the owning role so callers never need a
//! second round trip to resolve `role_id`.

use roster_core::types::DbId;
use roster_core::user::UserStatus;
use sqlx::PgPool;

use crate::models::user::{NewUser, UserChanges, UserWithRoleRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, status, role_id, created_at";

/// Projection of a user row aliased `u` joined with its role aliased `r`.
const JOINED_COLUMNS: &str = "u.id, u.name, u.email, u.password_hash, u.status, u.role_id, \
                              u.created_at, r.name AS role_name, r.permissions AS role_permissions";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row with its role.
    ///
    /// `status` takes the column default (`active`).
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<UserWithRoleRow, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO users (name, email, password_hash, role_id)
                VALUES ($1, $2, $3, $4)
                RETURNING {COLUMNS}
             )
             SELECT {JOINED_COLUMNS}
             FROM inserted u
             JOIN roles r ON r.id = u.role_id"
        );
        sqlx::query_as::<_, UserWithRoleRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// List all users with their roles, in creation order.
    pub async fn list_with_roles(pool: &PgPool) -> Result<Vec<UserWithRoleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM users u
             JOIN roles r ON r.id = u.role_id
             ORDER BY u.id ASC"
        );
        sqlx::query_as::<_, UserWithRoleRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UserChanges,
    ) -> Result<Option<UserWithRoleRow>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE users SET
                    name = COALESCE($2, name),
                    email = COALESCE($3, email),
                    password_hash = COALESCE($4, password_hash),
                    status = COALESCE($5, status),
                    role_id = COALESCE($6, role_id)
                WHERE id = $1
                RETURNING {COLUMNS}
             )
             SELECT {JOINED_COLUMNS}
             FROM updated u
             JOIN roles r ON r.id = u.role_id"
        );
        sqlx::query_as::<_, UserWithRoleRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.status.map(UserStatus::as_str))
            .bind(input.role_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
