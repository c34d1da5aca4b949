//! Lens core: pure batch queue state machine, ingestion and view-model helpers.
mod effect;
mod failure;
mod ingest;
mod item;
mod model;
mod msg;
mod parse;
mod session;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ExtractionRequest};
pub use failure::ExtractionFailure;
pub use ingest::{
    normalize, resolve_mime_type, Normalized, ProblemReason, RawFile, SubmissionError,
    SubmissionWarning, ValidationProblem, MAX_FILE_BYTES, MAX_TOTAL_BYTES,
};
pub use item::{EncodedPayload, ItemId, ItemStatus, QueueItem, SourceRef, EMPTY_RESULT_PLACEHOLDER};
pub use model::{ModelId, UnknownModel};
pub use msg::Msg;
pub use parse::{parse_rows, ParsedRow};
pub use session::{BatchSession, SessionId, SessionPhase};
pub use state::AppState;
pub use update::update;
pub use view_model::{
    copy_all_text, AppViewModel, ItemRowView, SubmissionReport, ViewMode,
};
