use crate::view_model::{AppViewModel, ItemRowView, SubmissionReport, ViewMode};
use crate::{
    parse_rows, BatchSession, ExtractionFailure, ItemId, ItemStatus, ModelId, ParsedRow,
    QueueItem, SessionId, SessionPhase,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    model: ModelId,
    session: Option<BatchSession>,
    next_session_id: SessionId,
    next_item_id: ItemId,
    selected: usize,
    view_mode: ViewMode,
    last_submission: Option<SubmissionReport>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            session: None,
            next_session_id: 1,
            next_item_id: 1,
            selected: 0,
            view_mode: ViewMode::default(),
            last_submission: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: ModelId) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn session(&self) -> Option<&BatchSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map(BatchSession::phase)
            .unwrap_or_default()
    }

    /// Rows for the selected item, recomputed on every call.
    pub fn selected_rows(&self) -> Vec<ParsedRow> {
        self.selected_item()
            .and_then(QueueItem::result_text)
            .map(parse_rows)
            .unwrap_or_default()
    }

    pub fn view(&self) -> AppViewModel {
        let items: Vec<ItemRowView> = self
            .session
            .as_ref()
            .map(|session| session.items().iter().map(ItemRowView::from_item).collect())
            .unwrap_or_default();
        let count = |status: ItemStatus| items.iter().filter(|row| row.status == status).count();
        let succeeded = count(ItemStatus::Success);
        let failed = count(ItemStatus::Error);

        AppViewModel {
            phase: self.phase(),
            model: self.model,
            total: items.len(),
            completed: succeeded + failed,
            succeeded,
            failed,
            selected: (!items.is_empty()).then_some(self.selected),
            view_mode: self.view_mode,
            selected_rows: self.selected_rows(),
            items,
            last_submission: self.last_submission.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything observable changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_item_id_mut(&mut self) -> &mut ItemId {
        &mut self.next_item_id
    }

    pub(crate) fn start_session(&mut self, items: Vec<QueueItem>) -> SessionId {
        let id = self.next_session_id;
        self.next_session_id += 1;
        self.session = Some(BatchSession::new(id, items));
        self.selected = 0;
        self.mark_dirty();
        id
    }

    pub(crate) fn discard_session(&mut self) -> Option<SessionId> {
        let discarded = self.session.take().map(|session| session.id());
        self.last_submission = None;
        self.selected = 0;
        self.mark_dirty();
        discarded
    }

    pub(crate) fn set_model(&mut self, model: ModelId) {
        if self.model != model {
            self.model = model;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_last_submission(&mut self, report: SubmissionReport) {
        self.last_submission = Some(report);
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, index: usize) {
        let len = self.session.as_ref().map_or(0, |s| s.items().len());
        let index = if index < len { index } else { 0 };
        if self.selected != index {
            self.selected = index;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::List => ViewMode::Raw,
            ViewMode::Raw => ViewMode::List,
        };
        self.mark_dirty();
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut BatchSession> {
        self.session.as_mut()
    }

    /// Applies a completion if it belongs to the current session's in-flight item.
    pub(crate) fn apply_completion(
        &mut self,
        session: SessionId,
        item: ItemId,
        result: Result<String, ExtractionFailure>,
    ) -> bool {
        let applied = match self.session.as_mut() {
            Some(current) if current.id() == session => current.finish(item, result),
            _ => false,
        };
        if applied {
            self.mark_dirty();
        }
        applied
    }

    fn selected_item(&self) -> Option<&QueueItem> {
        self.session
            .as_ref()
            .and_then(|session| session.items().get(self.selected))
    }
}
