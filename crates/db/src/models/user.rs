//! User row model and write DTOs.

use roster_core::role::Role;
use roster_core::types::{DbId, Timestamp};
use roster_core::user::{User, UserStatus};
use sqlx::FromRow;

use crate::store::StoreError;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never convert this into an API type
/// other than through [`UserWithRoleRow::into_user`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub status: String,
    pub role_id: DbId,
    pub created_at: Timestamp,
}

/// A user row joined with its role.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithRoleRow {
    #[sqlx(flatten)]
    pub user: UserRow,
    pub role_name: String,
    pub role_permissions: Vec<String>,
}

impl UserWithRoleRow {
    /// Convert into the API representation, dropping the password hash.
    pub fn into_user(self) -> Result<User, StoreError> {
        let status: UserStatus = self.user.status.parse().map_err(StoreError::Decode)?;
        Ok(User {
            id: self.user.id,
            name: self.user.name,
            email: self.user.email,
            status,
            role_id: self.user.role_id,
            role: Some(Role {
                id: self.user.role_id,
                name: self.role_name,
                permissions: self.role_permissions,
            }),
            created_at: self.user.created_at,
        })
    }
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}

/// DTO for a partial user update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub status: Option<UserStatus>,
    pub role_id: Option<DbId>,
}
