use roster_core::types::DbId;
use roster_core::validation::FieldErrors;

/// Whether an open form creates a row or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(DbId),
}

/// Add/edit form lifecycle for one panel.
///
/// Field errors shown in the form live here; they are cleared on the next
/// successful validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState<D> {
    Idle,
    Open {
        mode: FormMode,
        draft: D,
        errors: FieldErrors,
    },
}

impl<D> Default for FormState<D> {
    fn default() -> Self {
        FormState::Idle
    }
}

impl<D> FormState<D> {
    pub fn open(mode: FormMode, draft: D) -> Self {
        FormState::Open {
            mode,
            draft,
            errors: FieldErrors::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open { .. })
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            FormState::Open { mode, .. } => Some(*mode),
            FormState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            FormState::Open { draft, .. } => Some(draft),
            FormState::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            FormState::Open { draft, .. } => Some(draft),
            FormState::Idle => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            FormState::Open { errors, .. } => Some(errors),
            FormState::Idle => None,
        }
    }

    pub(crate) fn set_errors(&mut self, new_errors: FieldErrors) {
        if let FormState::Open { errors, .. } = self {
            *errors = new_errors;
        }
    }
}

/// A validated request ready to be sent through the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<C, P> {
    Create(C),
    Update(DbId, P),
}
