use async_trait::async_trait;
use roster_core::types::DbId;
use roster_core::user::{CreateUser, UpdateUser, User, UserStatus};
use roster_core::validation::{check_email, check_name, check_password, FieldErrors};

use super::form::{FormMode, Submission};
use super::panel::{Panel, PanelKind};
use crate::error::GatewayError;
use crate::gateway::DataGateway;

/// Editable copy of a user in the form.
///
/// `password` starts empty when editing; leaving it empty keeps the
/// stored password.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub status: UserStatus,
    pub role_id: Option<DbId>,
}

#[derive(Debug)]
pub struct UserKind;

pub type UserPanel = Panel<UserKind>;

#[async_trait]
impl PanelKind for UserKind {
    type Row = User;
    type Draft = UserDraft;
    type Create = CreateUser;
    type Patch = UpdateUser;

    const NOUN: &'static str = "user";
    const EMPTY_MESSAGE: &'static str = "No users found.";
    const HEADERS: &'static [&'static str] = &["Name", "Email", "Status", "Role"];

    fn draft_from(row: &User) -> UserDraft {
        UserDraft {
            name: row.name.clone(),
            email: row.email.clone(),
            password: String::new(),
            status: row.status,
            role_id: Some(row.role_id),
        }
    }

    fn prepare(
        draft: &UserDraft,
        mode: FormMode,
    ) -> Result<Submission<CreateUser, UpdateUser>, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(msg) = check_name(&draft.name) {
            errors.insert("name", msg);
        }
        if let Err(msg) = check_email(&draft.email) {
            errors.insert("email", msg);
        }
        if let Err(msg) = check_password(&draft.password, mode == FormMode::Add) {
            errors.insert("password", msg);
        }

        let role_id = match draft.role_id {
            Some(role_id) if errors.is_empty() => role_id,
            Some(_) => return Err(errors),
            None => {
                errors.insert("roleId", "Role is required");
                return Err(errors);
            }
        };

        let name = draft.name.trim().to_string();
        let email = draft.email.trim().to_string();
        Ok(match mode {
            FormMode::Add => Submission::Create(CreateUser {
                name,
                email,
                password: draft.password.clone(),
                role_id,
            }),
            FormMode::Edit(id) => Submission::Update(
                id,
                UpdateUser {
                    name: Some(name),
                    email: Some(email),
                    password: (!draft.password.is_empty()).then(|| draft.password.clone()),
                    status: Some(draft.status),
                    role_id: Some(role_id),
                },
            ),
        })
    }

    fn matches(row: &User, needle: &str) -> bool {
        row.name.to_lowercase().contains(needle)
            || needle.parse::<DbId>().is_ok_and(|id| id == row.role_id)
    }

    fn cells(row: &User) -> Vec<String> {
        let role = match &row.role {
            Some(role) => role.name.clone(),
            None => format!("#{}", row.role_id),
        };
        vec![
            row.name.clone(),
            row.email.clone(),
            row.status.to_string(),
            role,
        ]
    }

    async fn fetch(gateway: &dyn DataGateway) -> Result<Vec<User>, GatewayError> {
        gateway.list_users().await
    }

    async fn save(
        gateway: &dyn DataGateway,
        submission: &Submission<CreateUser, UpdateUser>,
    ) -> Result<User, GatewayError> {
        match submission {
            Submission::Create(input) => gateway.create_user(input).await,
            Submission::Update(id, patch) => gateway.update_user(*id, patch).await,
        }
    }

    async fn remove(gateway: &dyn DataGateway, id: DbId) -> Result<(), GatewayError> {
        gateway.remove_user(id).await
    }
}
