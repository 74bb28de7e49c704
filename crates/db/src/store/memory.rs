use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use roster_core::role::{CreateRole, Role, UpdateRole};
use roster_core::types::{DbId, Timestamp};
use roster_core::user::{User, UserStatus};
use tokio::sync::RwLock;

use super::{role_in_use, unknown_role, EntityStore, StoreError};
use crate::models::user::{NewUser, UserChanges};

#[derive(Debug, Clone)]
struct StoredUser {
    id: DbId,
    name: String,
    email: String,
    password_hash: String,
    status: UserStatus,
    role_id: DbId,
    created_at: Timestamp,
}

#[derive(Debug, Default)]
struct Tables {
    roles: BTreeMap<DbId, Role>,
    users: BTreeMap<DbId, StoredUser>,
    last_role_id: DbId,
    last_user_id: DbId,
}

impl Tables {
    fn resolve(&self, user: &StoredUser) -> User {
        User {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            status: user.status,
            role_id: user.role_id,
            role: self.roles.get(&user.role_id).cloned(),
            created_at: user.created_at,
        }
    }
}

/// In-process [`EntityStore`].
///
/// Ids are assigned from per-table sequences starting at 1 and are never
/// reused, matching `BIGSERIAL`. Listing returns rows in id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Password hash recorded for a user, if the user exists.
    pub async fn password_hash(&self, id: DbId) -> Option<String> {
        let tables = self.tables.read().await;
        tables.users.get(&id).map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().map(|u| tables.resolve(u)).collect())
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.roles.contains_key(&input.role_id) {
            return Err(unknown_role(input.role_id));
        }

        tables.last_user_id += 1;
        let stored = StoredUser {
            id: tables.last_user_id,
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            status: UserStatus::default(),
            role_id: input.role_id,
            created_at: Utc::now(),
        };
        let user = tables.resolve(&stored);
        tables.users.insert(stored.id, stored);
        Ok(user)
    }

    async fn update_user(
        &self,
        id: DbId,
        changes: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(role_id) = changes.role_id {
            if !tables.roles.contains_key(&role_id) {
                return Err(unknown_role(role_id));
            }
        }

        let Some(stored) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            stored.name = name.clone();
        }
        if let Some(email) = &changes.email {
            stored.email = email.clone();
        }
        if let Some(hash) = &changes.password_hash {
            stored.password_hash = hash.clone();
        }
        if let Some(status) = changes.status {
            stored.status = status;
        }
        if let Some(role_id) = changes.role_id {
            stored.role_id = role_id;
        }

        let stored = stored.clone();
        Ok(Some(tables.resolve(&stored)))
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.remove(&id).is_some())
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.roles.values().cloned().collect())
    }

    async fn create_role(&self, input: &CreateRole) -> Result<Role, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_role_id += 1;
        let role = Role {
            id: tables.last_role_id,
            name: input.name.clone(),
            permissions: input.permissions.clone(),
        };
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update_role(
        &self,
        id: DbId,
        changes: &UpdateRole,
    ) -> Result<Option<Role>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(role) = tables.roles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            role.name = name.clone();
        }
        if let Some(permissions) = &changes.permissions {
            role.permissions = permissions.clone();
        }
        Ok(Some(role.clone()))
    }

    async fn delete_role(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.role_id == id) {
            return Err(role_in_use(id));
        }
        Ok(tables.roles.remove(&id).is_some())
    }
}
