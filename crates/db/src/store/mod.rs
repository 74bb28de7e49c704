//! The [`EntityStore`] abstraction over user and role persistence.
//!
//! Handlers only see this trait. [`PgStore`] is the production backend;
//! [`MemoryStore`] keeps everything in process and follows the same
//! referential rules.

mod memory;
mod pg;

use async_trait::async_trait;
use roster_core::role::{CreateRole, Role, UpdateRole};
use roster_core::types::DbId;
use roster_core::user::User;

use crate::models::user::{NewUser, UserChanges};

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Errors surfaced by an [`EntityStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The write would break a referential rule (unknown role, role in use).
    #[error("{0}")]
    Conflict(String),

    /// A stored value could not be converted into its schema type.
    #[error("Corrupt row: {0}")]
    Decode(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// CRUD operations over users and roles.
///
/// `update_*` returns `None` and `delete_*` returns `false` when no row
/// matches the id. User reads always carry the resolved role.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Confirm the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError>;

    async fn update_user(&self, id: DbId, changes: &UserChanges)
        -> Result<Option<User>, StoreError>;

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError>;

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError>;

    async fn create_role(&self, input: &CreateRole) -> Result<Role, StoreError>;

    async fn update_role(&self, id: DbId, changes: &UpdateRole)
        -> Result<Option<Role>, StoreError>;

    /// Refused with [`StoreError::Conflict`] while any user holds the role.
    async fn delete_role(&self, id: DbId) -> Result<bool, StoreError>;
}

pub(crate) fn unknown_role(role_id: DbId) -> StoreError {
    StoreError::Conflict(format!("Role {role_id} does not exist"))
}

pub(crate) fn role_in_use(role_id: DbId) -> StoreError {
    StoreError::Conflict(format!("Role {role_id} is still assigned to users"))
}
