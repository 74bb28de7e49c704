use async_trait::async_trait;
use roster_core::role::{CreateRole, Role, UpdateRole};
use roster_core::types::DbId;
use roster_core::user::User;

use super::{role_in_use, unknown_role, EntityStore, StoreError};
use crate::models::user::{NewUser, UserChanges};
use crate::repositories::{RoleRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL error code for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// [`EntityStore`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

/// Map a write error, turning a foreign key violation into `conflict`.
fn map_write_error(err: sqlx::Error, conflict: impl FnOnce() -> StoreError) -> StoreError {
    if is_foreign_key_violation(&err) {
        tracing::debug!(error = %err, "Foreign key violation");
        conflict()
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        UserRepo::list_with_roles(&self.pool)
            .await?
            .into_iter()
            .map(|row| row.into_user())
            .collect()
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(|e| map_write_error(e, || unknown_role(input.role_id)))?
            .into_user()
    }

    async fn update_user(
        &self,
        id: DbId,
        changes: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let row = UserRepo::update(&self.pool, id, changes)
            .await
            .map_err(|e| map_write_error(e, || unknown_role(changes.role_id.unwrap_or_default())))?;
        row.map(|r| r.into_user()).transpose()
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        let rows = RoleRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn create_role(&self, input: &CreateRole) -> Result<Role, StoreError> {
        Ok(RoleRepo::create(&self.pool, input).await?.into())
    }

    async fn update_role(
        &self,
        id: DbId,
        changes: &UpdateRole,
    ) -> Result<Option<Role>, StoreError> {
        Ok(RoleRepo::update(&self.pool, id, changes)
            .await?
            .map(Role::from))
    }

    async fn delete_role(&self, id: DbId) -> Result<bool, StoreError> {
        RoleRepo::delete(&self.pool, id)
            .await
            .map_err(|e| map_write_error(e, || role_in_use(id)))
    }
}
