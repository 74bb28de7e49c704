/// Plain-text rendering of a panel, independent of any UI toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// Nothing to show; carries the placeholder message.
    Empty(&'static str),
    Rows {
        headers: &'static [&'static str],
        rows: Vec<Vec<String>>,
    },
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty(_))
    }

    pub fn row_count(&self) -> usize {
        match self {
            TableView::Empty(_) => 0,
            TableView::Rows { rows, .. } => rows.len(),
        }
    }
}
