use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::ExtractionFailure;

pub type ItemId = u64;

/// Stored in place of an empty extraction result.
pub const EMPTY_RESULT_PLACEHOLDER: &str = "No text could be extracted from this image.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    Pending,
    Processing,
    Success,
    Error,
}

impl ItemStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Success | ItemStatus::Error)
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemStatus::Pending => "waiting",
            ItemStatus::Processing => "processing",
            ItemStatus::Success => "done",
            ItemStatus::Error => "error",
        }
    }
}

/// Display metadata for the original input. The original bytes are never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub name: String,
    pub byte_len: u64,
}

/// Normalized content ready for the extraction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub base64: String,
    pub mime_type: String,
}

impl EncodedPayload {
    pub(crate) fn encode(bytes: &[u8], mime_type: String) -> Self {
        Self {
            base64: STANDARD.encode(bytes),
            mime_type,
        }
    }

    /// `data:` URL for previews. Display only.
    pub fn preview_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

// Result and error live inside the variant so neither can exist outside its status.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Progress {
    Pending,
    Processing,
    Succeeded(String),
    Failed(ExtractionFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    id: ItemId,
    source: SourceRef,
    payload: EncodedPayload,
    progress: Progress,
}

impl QueueItem {
    pub(crate) fn new(id: ItemId, source: SourceRef, payload: EncodedPayload) -> Self {
        Self {
            id,
            source,
            payload,
            progress: Progress::Pending,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    pub fn payload(&self) -> &EncodedPayload {
        &self.payload
    }

    pub fn status(&self) -> ItemStatus {
        match self.progress {
            Progress::Pending => ItemStatus::Pending,
            Progress::Processing => ItemStatus::Processing,
            Progress::Succeeded(_) => ItemStatus::Success,
            Progress::Failed(_) => ItemStatus::Error,
        }
    }

    pub fn result_text(&self) -> Option<&str> {
        match &self.progress {
            Progress::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<ExtractionFailure> {
        match self.progress {
            Progress::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.failure().map(ExtractionFailure::message)
    }

    /// `pending -> processing`. Returns false for any other starting status.
    pub(crate) fn begin(&mut self) -> bool {
        if self.progress != Progress::Pending {
            return false;
        }
        self.progress = Progress::Processing;
        true
    }

    /// `processing -> success | error`. Terminal states are never overwritten.
    pub(crate) fn finish(&mut self, result: Result<String, ExtractionFailure>) -> bool {
        if self.progress != Progress::Processing {
            return false;
        }
        self.progress = match result {
            Ok(text) if text.is_empty() => Progress::Succeeded(EMPTY_RESULT_PLACEHOLDER.to_string()),
            Ok(text) => Progress::Succeeded(text),
            Err(failure) => Progress::Failed(failure),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> QueueItem {
        QueueItem::new(
            1,
            SourceRef {
                name: "a.png".to_string(),
                byte_len: 3,
            },
            EncodedPayload::encode(b"abc", "image/png".to_string()),
        )
    }

    #[test]
    fn finish_requires_processing() {
        let mut item = item();
        assert!(!item.finish(Ok("early".to_string())));
        assert_eq!(item.status(), ItemStatus::Pending);
        assert!(item.begin());
        assert!(!item.begin());
        assert!(item.finish(Ok("text".to_string())));
        assert!(!item.finish(Err(ExtractionFailure::Unknown)));
        assert_eq!(item.result_text(), Some("text"));
        assert_eq!(item.error_message(), None);
    }

    #[test]
    fn empty_result_is_replaced_by_placeholder() {
        let mut item = item();
        item.begin();
        item.finish(Ok(String::new()));
        assert_eq!(item.result_text(), Some(EMPTY_RESULT_PLACEHOLDER));
    }

    #[test]
    fn failure_sets_message_only() {
        let mut item = item();
        item.begin();
        item.finish(Err(ExtractionFailure::ServiceOverloaded));
        assert_eq!(item.status(), ItemStatus::Error);
        assert_eq!(item.result_text(), None);
        assert_eq!(
            item.error_message(),
            Some(ExtractionFailure::ServiceOverloaded.message())
        );
    }

    #[test]
    fn preview_url_is_a_data_url() {
        assert_eq!(item().payload().preview_url(), "data:image/png;base64,YWJj");
    }
}
