use std::fmt;

use engine_logging::{engine_debug, engine_warn};

use crate::{EncodedPayload, ItemId, QueueItem, SourceRef};

/// Per-file limit. Larger files are excluded, not fatal.
pub const MAX_FILE_BYTES: u64 = 30 * 1024 * 1024;
/// Limit on the accepted files of one submission. Exceeding it rejects everything.
pub const MAX_TOTAL_BYTES: u64 = 500 * 1024 * 1024;

const GENERIC_BINARY: &str = "application/octet-stream";
const HEIC_MIME: &str = "image/heic";
const FALLBACK_MIME: &str = "image/jpeg";

/// A file-like input as handed over by the picker or the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    /// Declared content type; empty when the environment reported none.
    pub content_type: String,
    pub bytes: Vec<u8>,
    byte_len: u64,
}

impl RawFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            byte_len: bytes.len() as u64,
            bytes,
        }
    }

    /// A file whose size is already known to exceed [`MAX_FILE_BYTES`].
    /// Its bytes are never loaded; normalization only reports it as too large.
    pub fn oversized(
        name: impl Into<String>,
        content_type: impl Into<String>,
        byte_len: u64,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: Vec::new(),
            byte_len: byte_len.max(MAX_FILE_BYTES + 1),
        }
    }

    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemReason {
    TooLarge { byte_len: u64 },
    UnsupportedType { content_type: String },
}

impl fmt::Display for ProblemReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemReason::TooLarge { byte_len } => write!(
                f,
                "exceeds the {} MiB per-file limit ({:.2} MiB)",
                MAX_FILE_BYTES / (1024 * 1024),
                mib(byte_len)
            ),
            ProblemReason::UnsupportedType { content_type } if content_type.is_empty() => {
                write!(f, "is not a supported image type")
            }
            ProblemReason::UnsupportedType { content_type } => {
                write!(f, "is not a supported image type ({content_type})")
            }
        }
    }
}

/// A file excluded from the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationProblem {
    pub name: String,
    pub reason: ProblemReason,
}

/// Excluded files reported alongside an accepted batch. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionWarning {
    pub problems: Vec<ValidationProblem>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error(
        "total size {:.2} MiB exceeds the {} MiB batch limit; submit a smaller batch",
        mib(.observed_bytes),
        MAX_TOTAL_BYTES / (1024 * 1024)
    )]
    TotalSizeExceeded { observed_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    pub items: Vec<QueueItem>,
    pub warning: Option<SubmissionWarning>,
}

/// Validate and encode candidates into queue items, preserving input order.
///
/// Oversized or non-image files are excluded and reported in the warning.
/// The only failure is the aggregate size of the accepted files exceeding
/// [`MAX_TOTAL_BYTES`], in which case no item is produced and no id consumed.
pub fn normalize(
    candidates: Vec<RawFile>,
    next_id: &mut ItemId,
) -> Result<Normalized, SubmissionError> {
    let mut accepted = Vec::with_capacity(candidates.len());
    let mut problems = Vec::new();
    let mut total: u64 = 0;

    for file in candidates {
        if file.byte_len() > MAX_FILE_BYTES {
            problems.push(ValidationProblem {
                reason: ProblemReason::TooLarge {
                    byte_len: file.byte_len(),
                },
                name: file.name,
            });
            continue;
        }
        if !is_accepted_type(&file.content_type, &file.name) {
            problems.push(ValidationProblem {
                reason: ProblemReason::UnsupportedType {
                    content_type: file.content_type,
                },
                name: file.name,
            });
            continue;
        }
        total += file.byte_len();
        accepted.push(file);
    }

    if total > MAX_TOTAL_BYTES {
        engine_warn!(
            "Rejecting submission of {} files: {} bytes exceeds batch limit",
            accepted.len(),
            total
        );
        return Err(SubmissionError::TotalSizeExceeded {
            observed_bytes: total,
        });
    }

    for problem in &problems {
        engine_warn!("Excluded {}: {}", problem.name, problem.reason);
    }

    let items = accepted
        .into_iter()
        .map(|file| {
            let id = *next_id;
            *next_id += 1;
            let mime_type = resolve_mime_type(&file.content_type, &file.name);
            engine_debug!(
                "Normalized item {} name={} bytes={} mime={}",
                id,
                file.name,
                file.byte_len(),
                mime_type
            );
            let payload = EncodedPayload::encode(&file.bytes, mime_type);
            let source = SourceRef {
                byte_len: file.byte_len(),
                name: file.name,
            };
            QueueItem::new(id, source, payload)
        })
        .collect();

    let warning = (!problems.is_empty()).then_some(SubmissionWarning { problems });
    Ok(Normalized { items, warning })
}

/// Pick the mime type sent to the extraction service. Never empty.
pub fn resolve_mime_type(declared: &str, name: &str) -> String {
    let declared = declared.trim();
    if is_unrecognized(declared) && has_heic_extension(name) {
        return HEIC_MIME.to_string();
    }
    if declared.is_empty() {
        return FALLBACK_MIME.to_string();
    }
    declared.to_string()
}

fn is_accepted_type(declared: &str, name: &str) -> bool {
    let declared = declared.trim();
    if declared.to_ascii_lowercase().starts_with("image/") {
        return true;
    }
    is_unrecognized(declared) && has_heic_extension(name)
}

fn is_unrecognized(declared: &str) -> bool {
    declared.is_empty() || declared.eq_ignore_ascii_case(GENERIC_BINARY)
}

fn has_heic_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("heic") || ext.eq_ignore_ascii_case("heif"))
        .unwrap_or(false)
}

fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}
