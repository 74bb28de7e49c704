use std::sync::Arc;

use roster_core::role::Role;
use roster_core::types::DbId;
use roster_core::user::User;

/// Rows that carry a service-assigned id.
pub trait Keyed {
    fn key(&self) -> DbId;
}

impl Keyed for User {
    fn key(&self) -> DbId {
        self.id
    }
}

impl Keyed for Role {
    fn key(&self) -> DbId {
        self.id
    }
}

/// Immutable list of rows as last confirmed by the service.
///
/// Mutations return a new snapshot; the previous one stays valid for
/// anything still holding it. Cloning is a reference-count bump.
#[derive(Debug, Clone)]
pub struct Snapshot<E> {
    rows: Arc<[E]>,
}

impl<E> Default for Snapshot<E> {
    fn default() -> Self {
        Self {
            rows: Arc::from(Vec::new()),
        }
    }
}

impl<E: Keyed + Clone> Snapshot<E> {
    pub fn new(rows: Vec<E>) -> Self {
        Self {
            rows: Arc::from(rows),
        }
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&E> {
        self.rows.iter().find(|row| row.key() == id)
    }

    /// Replace the row with the same id in place, or append it.
    pub fn upsert(&self, row: E) -> Self {
        let mut rows = self.rows.to_vec();
        match rows.iter_mut().find(|existing| existing.key() == row.key()) {
            Some(slot) => *slot = row,
            None => rows.push(row),
        }
        Self::new(rows)
    }

    /// Drop the row with `id`. Unknown ids leave the rows as they are.
    pub fn without(&self, id: DbId) -> Self {
        Self::new(
            self.rows
                .iter()
                .filter(|row| row.key() != id)
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: DbId, name: &str) -> Role {
        Role {
            id,
            name: name.to_string(),
            permissions: Vec::new(),
        }
    }

    #[test]
    fn upsert_appends_new_rows() {
        let snapshot = Snapshot::new(vec![role(1, "Admin")]).upsert(role(2, "Editor"));
        let names: Vec<_> = snapshot.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Admin", "Editor"]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let snapshot = Snapshot::new(vec![role(1, "Admin"), role(2, "Editor")])
            .upsert(role(1, "Owner"));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.rows()[0].name, "Owner");
    }

    #[test]
    fn earlier_snapshot_is_unaffected() {
        let before = Snapshot::new(vec![role(1, "Admin")]);
        let after = before.without(1);
        assert!(after.is_empty());
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn without_unknown_id_keeps_rows() {
        let snapshot = Snapshot::new(vec![role(1, "Admin")]).without(9);
        assert!(snapshot.get(1).is_some());
    }
}
