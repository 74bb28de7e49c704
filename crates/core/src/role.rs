//! Role entity and its request DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A role as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    /// Permission tags. Open-ended in storage; the console offers [`Permission`].
    pub permissions: Vec<String>,
}

/// Request body for `POST /api/roles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Request body for `PUT /api/roles/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// The permission tags offered by the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Read,
    Write,
    Update,
    Delete,
}

impl Permission {
    /// All options in display order.
    pub const ALL: [Permission; 4] = [
        Permission::Read,
        Permission::Write,
        Permission::Update,
        Permission::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Read => "Read",
            Permission::Write => "Write",
            Permission::Update => "Update",
            Permission::Delete => "Delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a permission list into set form.
///
/// Tags are trimmed, empty tags are dropped and duplicates are removed while
/// keeping the position of the first occurrence.
pub fn normalize_permissions<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Toggle `tag` in `permissions`: remove it when present, append it otherwise.
pub fn toggle_permission(permissions: &mut Vec<String>, tag: &str) {
    if let Some(pos) = permissions.iter().position(|p| p == tag) {
        permissions.remove(pos);
    } else {
        permissions.push(tag.to_string());
    }
}
