//! User entity and its request DTOs.
//!
//! Field names are camelCase on the wire (`roleId`, `createdAt`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::types::{DbId, Timestamp};

/// Account status of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Deactive,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Deactive => "deactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "deactive" => Ok(UserStatus::Deactive),
            other => Err(format!("unknown user status '{other}'")),
        }
    }
}

/// A user as exposed by the API.
///
/// The password is write-only and has no field here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub role_id: DbId,
    /// Resolved role record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub created_at: Timestamp,
}

/// Request body for `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: DbId,
}

/// Request body for `PUT /api/users/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_active() {
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }

    #[test]
    fn status_wire_format_is_lowercase() {
        let json = serde_json::to_value(UserStatus::Deactive).unwrap();
        assert_eq!(json, "deactive");
        let parsed: UserStatus = serde_json::from_value(serde_json::json!("active")).unwrap();
        assert_eq!(parsed, UserStatus::Active);
    }

    #[test]
    fn status_rejects_unknown_value() {
        assert!("disabled".parse::<UserStatus>().is_err());
        assert!(serde_json::from_value::<UserStatus>(serde_json::json!("Active")).is_err());
    }

    #[test]
    fn create_user_reads_camel_case() {
        let input: CreateUser = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "secret1",
            "roleId": 3,
        }))
        .unwrap();
        assert_eq!(input.role_id, 3);
    }

    #[test]
    fn user_serializes_without_password_and_with_camel_case() {
        let user = User {
            id: 1,
            name: "Ana".into(),
            email: "ana@x.com".into(),
            status: UserStatus::Active,
            role_id: 2,
            role: None,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["roleId"], 2);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password").is_none());
        assert!(json.get("role").is_none());
    }

    #[test]
    fn partial_update_only_carries_given_fields() {
        let patch: UpdateUser =
            serde_json::from_value(serde_json::json!({"status": "deactive"})).unwrap();
        assert_eq!(patch.status, Some(UserStatus::Deactive));
        assert!(patch.name.is_none());
        assert!(patch.password.is_none());
    }
}
