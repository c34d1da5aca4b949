use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use lens_core::ExtractionRequest;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{ExtractError, FailureKind};

/// Instruction sent with every image.
pub const EXTRACTION_PROMPT: &str = "\
Please analyze this image and extract the text content efficiently for the user to copy.

Instructions:
1. Structure: If the image contains labeled fields (like \"Username: abc\", \"Password: 123\"), format them strictly as \"Label: Value\" on separate lines.
2. Clean: Remove unrelated visual noise, decorative text, or generic headers (e.g., \"Login Screen\", \"Welcome\").
3. Format: Do NOT use Markdown formatting (like bold **, italics *, or tables). Output plain text only.
4. Accuracy: Transcribe characters exactly as they appear (case-sensitive).

Output strictly the cleaned, structured text.";

#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// The extraction service contract: one image in, one complete text out.
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone)]
pub struct GeminiExtractor {
    settings: ExtractSettings,
    client: reqwest::Client,
}

impl GeminiExtractor {
    pub fn new(settings: ExtractSettings) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ExtractError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait::async_trait]
impl Extractor for GeminiExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String, ExtractError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &request.mime_type,
                            data: &request.base64,
                        },
                    },
                    Part::Text {
                        text: EXTRACTION_PROMPT,
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(request.model.as_str()))
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            engine_warn!("Extraction failed with {}: {}", status, body);
            return Err(classify_failure(status, &body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|err| ExtractError::new(FailureKind::MalformedResponse, err.to_string()))?;

        // Only the first candidate counts; its text parts are concatenated.
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        engine_debug!(
            "Extraction with {} returned {} chars",
            request.model,
            text.len()
        );
        Ok(text)
    }
}

/// Classify a non-success response from its status and error body.
fn classify_failure(status: StatusCode, body: &str) -> ExtractError {
    let lowered = body.to_ascii_lowercase();
    let kind = match status.as_u16() {
        _ if lowered.contains("api key") => FailureKind::Unauthorized,
        400 | 401 | 403 => FailureKind::Unauthorized,
        429 | 503 => FailureKind::Overloaded,
        _ if lowered.contains("overloaded") => FailureKind::Overloaded,
        code => FailureKind::HttpStatus(code),
    };
    let message = if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    };
    ExtractError::new(kind, message)
}

fn map_reqwest_error(err: reqwest::Error) -> ExtractError {
    if err.is_timeout() {
        return ExtractError::new(FailureKind::Timeout, err.to_string());
    }
    ExtractError::new(FailureKind::Network, err.to_string())
}
