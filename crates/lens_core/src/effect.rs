use crate::{ItemId, ModelId, SessionId};

/// Everything the extraction service needs for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub base64: String,
    pub mime_type: String,
    pub model: ModelId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one extraction; report back with `Msg::ExtractionFinished` carrying the same ids.
    Extract {
        session: SessionId,
        item: ItemId,
        request: ExtractionRequest,
    },
    /// Every item of the session reached a terminal status.
    SessionSettled { session: SessionId },
}
