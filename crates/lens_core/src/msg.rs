use crate::{ExtractionFailure, ItemId, ModelId, RawFile, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a new batch; replaces any current session.
    FilesSubmitted(Vec<RawFile>),
    /// User picked a model for items not yet dispatched.
    ModelSelected(ModelId),
    /// User discarded the current batch.
    ResetClicked,
    /// User selected an item in the result list.
    ItemSelected(usize),
    /// User switched between parsed rows and raw text.
    ViewModeToggled,
    /// Engine completion for a dispatched item.
    ExtractionFinished {
        session: SessionId,
        item: ItemId,
        result: Result<String, ExtractionFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
