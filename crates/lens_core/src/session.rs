use crate::{ExtractionFailure, ItemId, ItemStatus, QueueItem};

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No items.
    #[default]
    Idle,
    /// At least one item is pending or processing.
    Running,
    /// Every item is terminal.
    Settled,
}

/// The items submitted together. Only the dispatch step in `update` mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSession {
    id: SessionId,
    items: Vec<QueueItem>,
}

impl BatchSession {
    pub(crate) fn new(id: SessionId, items: Vec<QueueItem>) -> Self {
        Self { id, items }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn phase(&self) -> SessionPhase {
        if self.items.is_empty() {
            SessionPhase::Idle
        } else if self.items.iter().any(|item| !item.status().is_terminal()) {
            SessionPhase::Running
        } else {
            SessionPhase::Settled
        }
    }

    pub fn in_flight(&self) -> Option<&QueueItem> {
        self.items
            .iter()
            .find(|item| item.status() == ItemStatus::Processing)
    }

    /// Moves the first pending item to `processing`, unless one already is.
    pub(crate) fn begin_next(&mut self) -> Option<&QueueItem> {
        if self.in_flight().is_some() {
            return None;
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.status() == ItemStatus::Pending)?;
        item.begin();
        Some(&*item)
    }

    /// Applies a completion to the in-flight item with `item_id`.
    pub(crate) fn finish(
        &mut self,
        item_id: ItemId,
        result: Result<String, ExtractionFailure>,
    ) -> bool {
        self.items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .map(|item| item.finish(result))
            .unwrap_or(false)
    }
}
