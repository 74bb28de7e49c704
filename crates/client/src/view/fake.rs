//! In-process [`DataGateway`] for panel tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use roster_core::role::{normalize_permissions, CreateRole, Role, UpdateRole};
use roster_core::types::DbId;
use roster_core::user::{CreateUser, UpdateUser, User, UserStatus};

use crate::error::GatewayError;
use crate::gateway::DataGateway;

pub fn sample_user(id: DbId, name: &str, role_id: DbId) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        status: UserStatus::Active,
        role_id,
        role: None,
        created_at: chrono::Utc::now(),
    }
}

#[derive(Debug, Default)]
pub struct FakeGateway {
    users: Mutex<Vec<User>>,
    roles: Mutex<Vec<Role>>,
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl FakeGateway {
    /// A gateway holding one role with id 1.
    pub fn with_role(name: &str) -> Self {
        let gateway = Self::default();
        gateway.roles.lock().unwrap().push(Role {
            id: 1,
            name: name.to_string(),
            permissions: vec!["Read".to_string()],
        });
        gateway
    }

    pub fn seed_user(&self, mut user: User) {
        user.role = self.role(user.role_id);
        self.users.lock().unwrap().push(user);
    }

    pub fn seed_role(&self, role: Role) {
        self.roles.lock().unwrap().push(role);
    }

    /// Make the next gateway call fail with a 500.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn role(&self, id: DbId) -> Option<Role> {
        self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    fn enter(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(GatewayError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: Some("INTERNAL_ERROR".to_string()),
                message: "An internal error occurred".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(entity: &str, id: DbId) -> GatewayError {
    GatewayError::Status {
        status: StatusCode::NOT_FOUND,
        code: Some("NOT_FOUND".to_string()),
        message: format!("{entity} with id {id} not found"),
    }
}

#[async_trait]
impl DataGateway for FakeGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        self.enter()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, GatewayError> {
        self.enter()?;
        let mut users = self.users.lock().unwrap();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let mut user = sample_user(id, &input.name, input.role_id);
        user.email = input.email.clone();
        user.role = self.role(input.role_id);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: DbId, patch: &UpdateUser) -> Result<User, GatewayError> {
        self.enter()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("User", id))?;
        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(status) = patch.status {
            user.status = status;
        }
        if let Some(role_id) = patch.role_id {
            user.role_id = role_id;
            user.role = self.role(role_id);
        }
        Ok(user.clone())
    }

    async fn remove_user(&self, id: DbId) -> Result<(), GatewayError> {
        self.enter()?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(not_found("User", id));
        }
        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<Role>, GatewayError> {
        self.enter()?;
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn create_role(&self, input: &CreateRole) -> Result<Role, GatewayError> {
        self.enter()?;
        let mut roles = self.roles.lock().unwrap();
        let role = Role {
            id: roles.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            name: input.name.clone(),
            permissions: normalize_permissions(&input.permissions),
        };
        roles.push(role.clone());
        Ok(role)
    }

    async fn update_role(&self, id: DbId, patch: &UpdateRole) -> Result<Role, GatewayError> {
        self.enter()?;
        let mut roles = self.roles.lock().unwrap();
        let role = roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("Role", id))?;
        if let Some(name) = &patch.name {
            role.name = name.clone();
        }
        if let Some(permissions) = &patch.permissions {
            role.permissions = normalize_permissions(permissions);
        }
        Ok(role.clone())
    }

    async fn remove_role(&self, id: DbId) -> Result<(), GatewayError> {
        self.enter()?;
        let mut roles = self.roles.lock().unwrap();
        let before = roles.len();
        roles.retain(|r| r.id != id);
        if roles.len() == before {
            return Err(not_found("Role", id));
        }
        Ok(())
    }
}
