use std::fmt;
use std::str::FromStr;

/// Remote model used for text extraction. Session-wide, not negotiated per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelId {
    /// Fast, low-cost tier.
    #[default]
    Flash,
    /// Slower, higher-quality tier.
    Pro,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Flash, ModelId::Pro];

    /// Identifier sent to the extraction service.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Flash => "gemini-2.5-flash",
            ModelId::Pro => "gemini-3-pro-preview",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model `{0}` (expected flash, pro or a full model id)")]
pub struct UnknownModel(pub String);

impl FromStr for ModelId {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("flash") {
            return Ok(ModelId::Flash);
        }
        if wanted.eq_ignore_ascii_case("pro") {
            return Ok(ModelId::Pro);
        }
        ModelId::ALL
            .into_iter()
            .find(|model| model.as_str() == wanted)
            .ok_or_else(|| UnknownModel(wanted.to_string()))
    }
}
