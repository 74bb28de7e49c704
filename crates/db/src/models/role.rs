//! Role row model.

use roster_core::role::Role;
use roster_core::types::DbId;
use sqlx::FromRow;

/// A row from the `roles` table.
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: DbId,
    pub name: String,
    pub permissions: Vec<String>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            permissions: row.permissions,
        }
    }
}
