//! Wiremock integration tests for [`OpenAiAnalyzer`].
//!
//! These tests verify the request shape and error mapping using mocked responses.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use titlelang::analysis::{LanguageAnalyzer, SYSTEM_PROMPT};
use titlelang::{OpenAiAnalyzer, TitleLangError};

/// Wrap message content in a chat-completions envelope.
fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

const ITALIAN: &str = r#"{"DetectedLanguage": "Italian", "ISO639LanguageCode": "it", "Confidence": 0.95, "Transliteration": "La Vita e Bella", "Translation": "Life Is Beautiful"}"#;

async fn mount_completion(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_analyze_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test_key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.0,
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(ITALIAN)))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let result = analyzer
        .analyze("La Vita è Bella")
        .await
        .expect("analyze should succeed");

    assert_eq!(result.detected_language, "Italian");
    assert_eq!(result.language_code, "it");
    assert_eq!(result.confidence.to_string(), "0.95");
    assert_eq!(result.transliteration, "La Vita e Bella");
    assert_eq!(result.translation, "Life Is Beautiful");
}

#[tokio::test]
async fn test_request_embeds_title_and_instructions() {
    let server = MockServer::start().await;
    mount_completion(&server, 200, completion(ITALIAN)).await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    analyzer.analyze("La Vita è Bella").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
    assert_eq!(messages[1]["role"], "user");
    let user = messages[1]["content"].as_str().unwrap();
    assert!(user.contains("'La Vita è Bella'"));
    assert!(user.contains("ISO639LanguageCode"));
    assert!(user.contains("Latin-1"));
}

#[tokio::test]
async fn test_custom_model_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4o"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(ITALIAN)))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", format!("{}/", server.uri()))
        .model("gpt-4o");
    assert_eq!(analyzer.model_name(), "gpt-4o");
    assert!(analyzer.analyze("Ran").await.is_ok());
}

#[tokio::test]
async fn test_quoted_confidence_kept_exact() {
    let server = MockServer::start().await;
    let content = ITALIAN.replace("0.95", "\"0.87\"");
    mount_completion(&server, 200, completion(&content)).await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let result = analyzer.analyze("La Vita è Bella").await.unwrap();
    assert_eq!(result.confidence.to_string(), "0.87");
}

// ============================================================================
// Malformed payloads
// ============================================================================

#[tokio::test]
async fn test_non_json_content_is_malformed() {
    let server = MockServer::start().await;
    mount_completion(&server, 200, completion("The title is Italian.")).await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let err = analyzer.analyze("La Vita è Bella").await.unwrap_err();
    assert!(matches!(err, TitleLangError::MalformedResponse(_)), "{err}");
}

#[tokio::test]
async fn test_missing_key_is_malformed() {
    let server = MockServer::start().await;
    let content = r#"{"DetectedLanguage": "Italian", "Confidence": 0.9,
        "Transliteration": "La Vita e Bella", "Translation": "Life Is Beautiful"}"#;
    mount_completion(&server, 200, completion(content)).await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let err = analyzer.analyze("La Vita è Bella").await.unwrap_err();
    assert!(matches!(err, TitleLangError::MalformedResponse(_)));
    assert!(err.to_string().contains("ISO639LanguageCode"));
}

#[tokio::test]
async fn test_fenced_content_is_malformed() {
    let server = MockServer::start().await;
    let content = format!("```json\n{ITALIAN}\n```");
    mount_completion(&server, 200, completion(&content)).await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let err = analyzer.analyze("La Vita è Bella").await.unwrap_err();
    assert!(matches!(err, TitleLangError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let server = MockServer::start().await;
    mount_completion(&server, 200, json!({"choices": []})).await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let err = analyzer.analyze("Ran").await.unwrap_err();
    assert!(matches!(err, TitleLangError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_null_content_is_malformed() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        200,
        json!({"choices": [{"message": {"role": "assistant", "content": null}}]}),
    )
    .await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let err = analyzer.analyze("Ran").await.unwrap_err();
    assert!(matches!(err, TitleLangError::MalformedResponse(_)));
}

// ============================================================================
// Service errors (single attempt, no retry)
// ============================================================================

#[tokio::test]
async fn test_auth_error() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        401,
        json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}),
    )
    .await;

    let analyzer = OpenAiAnalyzer::with_base_url("bad_key", server.uri());
    let err = analyzer.analyze("Ran").await.unwrap_err();
    assert!(matches!(err, TitleLangError::AnalysisService(_)));
    let msg = err.to_string();
    assert!(msg.contains("authentication failed"), "{msg}");
    assert!(msg.contains("Incorrect API key provided"), "{msg}");
}

#[tokio::test]
async fn test_rate_limit_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "20")
                .set_body_json(json!({"error": {"message": "Rate limit reached"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let err = analyzer.analyze("Ran").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("rate limited, retry after 20s"), "{msg}");
    assert!(msg.contains("Rate limit reached"), "{msg}");
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = OpenAiAnalyzer::with_base_url("test_key", server.uri());
    let err = analyzer.analyze("Ran").await.unwrap_err();
    assert!(matches!(err, TitleLangError::AnalysisService(_)));
    assert!(err.to_string().contains("API error (500): upstream exploded"));
    // `.expect(1)` is verified when the server drops
}

#[tokio::test]
async fn test_connection_refused() {
    let analyzer = OpenAiAnalyzer::with_base_url("test_key", "http://127.0.0.1:1");
    let err = analyzer.analyze("Ran").await.unwrap_err();
    assert!(matches!(err, TitleLangError::AnalysisService(_)));
}

#[test]
fn test_analyzer_name() {
    let analyzer = OpenAiAnalyzer::new("test_key");
    assert_eq!(analyzer.name(), "openai");
    assert_eq!(analyzer.model_name(), "gpt-4o-mini");
}
