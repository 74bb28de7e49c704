use std::fmt::Debug;

use async_trait::async_trait;
use roster_core::types::DbId;
use roster_core::validation::FieldErrors;

use super::form::{FormMode, FormState, Submission};
use super::snapshot::{Keyed, Snapshot};
use super::table::TableView;
use super::ViewError;
use crate::error::GatewayError;
use crate::gateway::DataGateway;

/// What a [`Panel`] needs to know about the entity it lists.
#[async_trait]
pub trait PanelKind: Debug + Send + Sync + 'static {
    type Row: Keyed + Clone + Debug + Send + Sync;
    type Draft: Clone + Default + Debug + PartialEq + Send + Sync;
    type Create: Debug + Send + Sync;
    type Patch: Debug + Send + Sync;

    /// Singular noun used in messages, e.g. `"user"`.
    const NOUN: &'static str;
    const EMPTY_MESSAGE: &'static str;
    const HEADERS: &'static [&'static str];

    fn draft_from(row: &Self::Row) -> Self::Draft;

    /// Validate a draft and turn it into the request to send.
    fn prepare(
        draft: &Self::Draft,
        mode: FormMode,
    ) -> Result<Submission<Self::Create, Self::Patch>, FieldErrors>;

    /// Whether `row` passes a non-empty, lowercased filter.
    fn matches(row: &Self::Row, needle: &str) -> bool;

    fn cells(row: &Self::Row) -> Vec<String>;

    async fn fetch(gateway: &dyn DataGateway) -> Result<Vec<Self::Row>, GatewayError>;

    async fn save(
        gateway: &dyn DataGateway,
        submission: &Submission<Self::Create, Self::Patch>,
    ) -> Result<Self::Row, GatewayError>;

    async fn remove(gateway: &dyn DataGateway, id: DbId) -> Result<(), GatewayError>;
}

/// State machine for one entity list.
///
/// At most one submit or delete is outstanding at a time, and the form
/// cannot be opened, switched or cancelled while it is. The two-phase
/// `begin_*`/`complete_*` pairs let a UI run the request elsewhere while
/// the panel keeps rendering; `submit` and `confirm_delete` do both halves
/// in one call.
#[derive(Debug)]
pub struct Panel<K: PanelKind> {
    rows: Snapshot<K::Row>,
    form: FormState<K::Draft>,
    filter: String,
    pending_delete: Option<DbId>,
    in_flight: bool,
    error: Option<String>,
}

impl<K: PanelKind> Default for Panel<K> {
    fn default() -> Self {
        Self {
            rows: Snapshot::default(),
            form: FormState::Idle,
            filter: String::new(),
            pending_delete: None,
            in_flight: false,
            error: None,
        }
    }
}

impl<K: PanelKind> Panel<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &Snapshot<K::Row> {
        &self.rows
    }

    pub fn form(&self) -> &FormState<K::Draft> {
        &self.form
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Last failure message, for display only.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn pending_delete(&self) -> Option<DbId> {
        self.pending_delete
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Fetch the full list. On failure the current rows stay as they are.
    pub async fn load(&mut self, gateway: &dyn DataGateway) -> Result<(), ViewError> {
        match K::fetch(gateway).await {
            Ok(rows) => {
                tracing::debug!(kind = K::NOUN, count = rows.len(), "Loaded rows");
                self.rows = Snapshot::new(rows);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = K::NOUN, error = %e, "Load failed");
                self.error = Some(format!("Could not load {}s: {e}", K::NOUN));
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Form
    // -----------------------------------------------------------------------

    /// Open an empty form. Refused while a request is in flight, since its
    /// completion closes the form.
    pub fn open_add(&mut self) -> Result<(), ViewError> {
        self.ensure_idle()?;
        self.form = FormState::open(FormMode::Add, K::Draft::default());
        Ok(())
    }

    /// Open the form pre-filled from the row with `id`.
    pub fn open_edit(&mut self, id: DbId) -> Result<(), ViewError> {
        self.ensure_idle()?;
        let row = self.rows.get(id).ok_or(ViewError::UnknownRow(id))?;
        self.form = FormState::open(FormMode::Edit(id), K::draft_from(row));
        Ok(())
    }

    pub fn draft_mut(&mut self) -> Option<&mut K::Draft> {
        self.form.draft_mut()
    }

    /// Close the form and discard the draft.
    pub fn cancel(&mut self) -> Result<(), ViewError> {
        self.ensure_idle()?;
        self.form = FormState::Idle;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), ViewError> {
        if self.in_flight {
            return Err(ViewError::Busy);
        }
        Ok(())
    }

    /// Validate the open draft and mark a submission as in flight.
    ///
    /// Validation failures are stored on the form and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<Submission<K::Create, K::Patch>, ViewError> {
        self.ensure_idle()?;
        let (mode, draft) = match &self.form {
            FormState::Open { mode, draft, .. } => (*mode, draft),
            FormState::Idle => return Err(ViewError::NoForm),
        };

        match K::prepare(draft, mode) {
            Ok(submission) => {
                self.form.set_errors(FieldErrors::new());
                self.in_flight = true;
                Ok(submission)
            }
            Err(errors) => {
                self.form.set_errors(errors.clone());
                Err(ViewError::Invalid(errors))
            }
        }
    }

    /// Apply the outcome of a submission started with [`Self::begin_submit`].
    ///
    /// Success merges the returned row and closes the form. Failure keeps
    /// the form open with the draft intact.
    pub fn complete_submit(
        &mut self,
        outcome: Result<K::Row, GatewayError>,
    ) -> Result<(), ViewError> {
        self.in_flight = false;
        match outcome {
            Ok(row) => {
                tracing::debug!(kind = K::NOUN, id = row.key(), "Saved");
                self.rows = self.rows.upsert(row);
                self.form = FormState::Idle;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = K::NOUN, error = %e, "Save failed");
                self.error = Some(format!("Could not save {}: {e}", K::NOUN));
                Err(e.into())
            }
        }
    }

    pub async fn submit(&mut self, gateway: &dyn DataGateway) -> Result<(), ViewError> {
        let submission = self.begin_submit()?;
        let outcome = K::save(gateway, &submission).await;
        self.complete_submit(outcome)
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Ask for confirmation before deleting the row with `id`.
    pub fn request_delete(&mut self, id: DbId) -> Result<(), ViewError> {
        if self.rows.get(id).is_none() {
            return Err(ViewError::UnknownRow(id));
        }
        self.pending_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the confirmed delete and mark it as in flight.
    pub fn begin_delete(&mut self) -> Result<DbId, ViewError> {
        self.ensure_idle()?;
        let id = self.pending_delete.take().ok_or(ViewError::NothingToConfirm)?;
        self.in_flight = true;
        Ok(id)
    }

    /// Apply the outcome of a delete started with [`Self::begin_delete`].
    pub fn complete_delete(
        &mut self,
        id: DbId,
        outcome: Result<(), GatewayError>,
    ) -> Result<(), ViewError> {
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                tracing::debug!(kind = K::NOUN, id, "Deleted");
                self.rows = self.rows.without(id);
                if self.form.mode() == Some(FormMode::Edit(id)) {
                    self.form = FormState::Idle;
                }
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = K::NOUN, id, error = %e, "Delete failed");
                self.error = Some(format!("Could not delete {}: {e}", K::NOUN));
                Err(e.into())
            }
        }
    }

    pub async fn confirm_delete(&mut self, gateway: &dyn DataGateway) -> Result<(), ViewError> {
        let id = self.begin_delete()?;
        let outcome = K::remove(gateway, id).await;
        self.complete_delete(id, outcome)
    }

    /// Delete without a separate confirmation step.
    pub async fn delete(&mut self, id: DbId, gateway: &dyn DataGateway) -> Result<(), ViewError> {
        self.ensure_idle()?;
        self.request_delete(id)?;
        self.confirm_delete(gateway).await
    }

    // -----------------------------------------------------------------------
    // Filtering and rendering
    // -----------------------------------------------------------------------

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    /// Rows passing the current filter, in snapshot order.
    pub fn visible_rows(&self) -> Vec<&K::Row> {
        let needle = self.filter.trim().to_lowercase();
        self.rows
            .rows()
            .iter()
            .filter(|row| needle.is_empty() || K::matches(row, &needle))
            .collect()
    }

    pub fn table(&self) -> TableView {
        let rows: Vec<Vec<String>> = self.visible_rows().into_iter().map(K::cells).collect();
        if rows.is_empty() {
            TableView::Empty(K::EMPTY_MESSAGE)
        } else {
            TableView::Rows {
                headers: K::HEADERS,
                rows,
            }
        }
    }
}
