use async_trait::async_trait;
use roster_core::role::{self, normalize_permissions, CreateRole, Permission, Role, UpdateRole};
use roster_core::types::DbId;
use roster_core::validation::{check_name, FieldErrors};

use super::form::{FormMode, Submission};
use super::panel::{Panel, PanelKind};
use super::ViewError;
use crate::error::GatewayError;
use crate::gateway::DataGateway;

/// Editable copy of a role in the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleDraft {
    pub name: String,
    pub permissions: Vec<String>,
}

impl RoleDraft {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.iter().any(|p| p == permission.as_str())
    }
}

#[derive(Debug)]
pub struct RoleKind;

pub type RolePanel = Panel<RoleKind>;

impl Panel<RoleKind> {
    /// Flip one permission checkbox in the open form.
    pub fn toggle_permission(&mut self, permission: Permission) -> Result<(), ViewError> {
        let draft = self.draft_mut().ok_or(ViewError::NoForm)?;
        role::toggle_permission(&mut draft.permissions, permission.as_str());
        Ok(())
    }
}

#[async_trait]
impl PanelKind for RoleKind {
    type Row = Role;
    type Draft = RoleDraft;
    type Create = CreateRole;
    type Patch = UpdateRole;

    const NOUN: &'static str = "role";
    const EMPTY_MESSAGE: &'static str = "No roles found.";
    const HEADERS: &'static [&'static str] = &["Name", "Permissions"];

    fn draft_from(row: &Role) -> RoleDraft {
        RoleDraft {
            name: row.name.clone(),
            permissions: row.permissions.clone(),
        }
    }

    fn prepare(
        draft: &RoleDraft,
        mode: FormMode,
    ) -> Result<Submission<CreateRole, UpdateRole>, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(msg) = check_name(&draft.name) {
            errors.insert("name", msg);
        }
        errors.into_result()?;

        let name = draft.name.trim().to_string();
        let permissions = normalize_permissions(&draft.permissions);
        Ok(match mode {
            FormMode::Add => Submission::Create(CreateRole { name, permissions }),
            FormMode::Edit(id) => Submission::Update(
                id,
                UpdateRole {
                    name: Some(name),
                    permissions: Some(permissions),
                },
            ),
        })
    }

    fn matches(row: &Role, needle: &str) -> bool {
        row.name.to_lowercase().contains(needle)
    }

    fn cells(row: &Role) -> Vec<String> {
        vec![row.name.clone(), row.permissions.join(", ")]
    }

    async fn fetch(gateway: &dyn DataGateway) -> Result<Vec<Role>, GatewayError> {
        gateway.list_roles().await
    }

    async fn save(
        gateway: &dyn DataGateway,
        submission: &Submission<CreateRole, UpdateRole>,
    ) -> Result<Role, GatewayError> {
        match submission {
            Submission::Create(input) => gateway.create_role(input).await,
            Submission::Update(id, patch) => gateway.update_role(*id, patch).await,
        }
    }

    async fn remove(gateway: &dyn DataGateway, id: DbId) -> Result<(), GatewayError> {
        gateway.remove_role(id).await
    }
}
