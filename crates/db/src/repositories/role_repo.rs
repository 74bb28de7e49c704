//! Repository for the `roles` table.

use roster_core::role::{CreateRole, UpdateRole};
use roster_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::RoleRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, permissions";

/// Provides CRUD operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRole) -> Result<RoleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (name, permissions)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoleRow>(&query)
            .bind(&input.name)
            .bind(&input.permissions)
            .fetch_one(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<RoleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, RoleRow>(&query).fetch_all(pool).await
    }

    /// Update a role. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<RoleRow>, sqlx::Error> {
        let query = format!(
            "UPDATE roles SET
                name = COALESCE($2, name),
                permissions = COALESCE($3, permissions)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoleRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.permissions)
            .fetch_optional(pool)
            .await
    }

    /// Delete a role. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign key violation while users still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
