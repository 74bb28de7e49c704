//! View state for the admin console.
//!
//! Each [`Panel`] mirrors one entity list: it holds the last snapshot the
//! service confirmed, an add/edit form, an optional pending delete and a
//! filter. Panels never change their list speculatively; rows are replaced
//! only with what a successful gateway call returned.

mod form;
mod panel;
mod roles;
mod snapshot;
mod table;
mod users;

#[cfg(test)]
mod fake;

use roster_core::types::DbId;
use roster_core::validation::FieldErrors;

use crate::error::GatewayError;

pub use form::{FormMode, FormState, Submission};
pub use panel::{Panel, PanelKind};
pub use roles::{RoleDraft, RoleKind, RolePanel};
pub use snapshot::{Keyed, Snapshot};
pub use table::TableView;
pub use users::{UserDraft, UserKind, UserPanel};

/// Why a panel operation did not go ahead.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A submit or delete for this panel has not completed yet.
    #[error("Another request is still in flight")]
    Busy,

    #[error("No form is open")]
    NoForm,

    #[error("No delete is awaiting confirmation")]
    NothingToConfirm,

    #[error("Row {0} is not in the current list")]
    UnknownRow(DbId),

    /// Client-side validation failed; nothing was sent.
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
