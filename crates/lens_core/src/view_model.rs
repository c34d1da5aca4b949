use crate::{
    ItemId, ItemStatus, ModelId, ParsedRow, QueueItem, SessionPhase, ValidationProblem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Parsed rows.
    #[default]
    List,
    /// Raw extracted text.
    Raw,
}

/// Outcome of the most recent submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionReport {
    Accepted {
        accepted: usize,
        excluded: Vec<ValidationProblem>,
    },
    /// Nothing survived per-file validation; the previous session is kept.
    Empty { excluded: Vec<ValidationProblem> },
    /// Aggregate size limit exceeded; nothing was created.
    Rejected { observed_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: SessionPhase,
    pub model: ModelId,
    pub items: Vec<ItemRowView>,
    pub total: usize,
    /// Items in a terminal status, successful or not.
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub selected: Option<usize>,
    pub view_mode: ViewMode,
    pub selected_rows: Vec<ParsedRow>,
    pub last_submission: Option<SubmissionReport>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRowView {
    pub id: ItemId,
    pub name: String,
    pub byte_len: u64,
    pub mime_type: String,
    pub status: ItemStatus,
    pub result_text: Option<String>,
    pub error_message: Option<String>,
}

impl ItemRowView {
    pub(crate) fn from_item(item: &QueueItem) -> Self {
        Self {
            id: item.id(),
            name: item.source().name.clone(),
            byte_len: item.source().byte_len,
            mime_type: item.payload().mime_type.clone(),
            status: item.status(),
            result_text: item.result_text().map(ToOwned::to_owned),
            error_message: item.error_message().map(ToOwned::to_owned),
        }
    }
}

/// Successful results as `--- name ---` blocks separated by a blank line.
pub fn copy_all_text(items: &[ItemRowView]) -> String {
    items
        .iter()
        .filter(|row| row.status == ItemStatus::Success)
        .filter_map(|row| {
            row.result_text
                .as_deref()
                .map(|text| format!("--- {} ---\n{}", row.name, text))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
