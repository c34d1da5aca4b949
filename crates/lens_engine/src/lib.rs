//! Lens engine: extraction service client and effect execution.
mod engine;
mod extract;
mod persist;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use extract::{ExtractSettings, Extractor, GeminiExtractor, EXTRACTION_PROMPT};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, ExtractError, FailureKind};
