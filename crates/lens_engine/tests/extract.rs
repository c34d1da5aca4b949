use std::time::Duration;

use lens_core::{ExtractionRequest, ModelId};
use lens_engine::{ExtractSettings, Extractor, FailureKind, GeminiExtractor};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(model: ModelId) -> ExtractionRequest {
    ExtractionRequest {
        base64: "aGVsbG8=".to_string(),
        mime_type: "image/heic".to_string(),
        model,
    }
}

fn extractor(server: &MockServer) -> GeminiExtractor {
    GeminiExtractor::new(ExtractSettings {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        ..ExtractSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn sends_inline_image_and_joins_text_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [{ "inlineData": { "mimeType": "image/heic", "data": "aGVsbG8=" } }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Username: alice\n" }, { "text": "Password: secret" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = extractor(&server)
        .extract(&request(ModelId::Flash))
        .await
        .expect("extract ok");
    assert_eq!(text, "Username: alice\nPassword: secret");
}

#[tokio::test]
async fn model_selects_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "pro" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = extractor(&server)
        .extract(&request(ModelId::Pro))
        .await
        .unwrap();
    assert_eq!(text, "pro");
}

#[tokio::test]
async fn response_without_text_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let text = extractor(&server)
        .extract(&request(ModelId::Flash))
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn forbidden_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(&request(ModelId::Flash))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Unauthorized);
}

#[tokio::test]
async fn unavailable_is_overloaded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("The model is overloaded."))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(&request(ModelId::Flash))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Overloaded);
}

#[tokio::test]
async fn other_server_errors_keep_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(&request(ModelId::Flash))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn garbage_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(&request(ModelId::Flash))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let extractor = GeminiExtractor::new(ExtractSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ExtractSettings::default()
    })
    .unwrap();
    let err = extractor
        .extract(&request(ModelId::Flash))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
