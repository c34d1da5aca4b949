use std::fmt;

/// Classified, user-presentable reason an item's extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// Credentials or authorization were rejected.
    AuthOrPermission,
    /// The service is temporarily out of capacity.
    ServiceOverloaded,
    /// Anything else, including network-level failures.
    Unknown,
}

impl ExtractionFailure {
    pub fn message(self) -> &'static str {
        match self {
            ExtractionFailure::AuthOrPermission => {
                "The API key is invalid or lacks permission (400/403). Check your API key settings."
            }
            ExtractionFailure::ServiceOverloaded => {
                "The model is currently overloaded. Try again later or switch models."
            }
            ExtractionFailure::Unknown => {
                "Image analysis failed. Make sure the image is clear, or check your network connection and try again."
            }
        }
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
