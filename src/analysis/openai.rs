//! OpenAI chat-completions client for title analysis.
//!
//! Works against any OpenAI-compatible `/chat/completions` endpoint.
//! See: <https://platform.openai.com/docs/api-reference/chat>

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{LanguageAnalyzer, SYSTEM_PROMPT, parse_analysis, user_prompt};
use crate::types::AnalysisResult;
use crate::{Result, TitleLangError, telemetry};

/// Default base URL for the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// [`LanguageAnalyzer`] backed by an OpenAI-compatible chat model.
///
/// Every request is zero-temperature and asks for a JSON object response.
#[derive(Clone)]
pub struct OpenAiAnalyzer {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiAnalyzer {
    /// Create an analyzer for the public OpenAI API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create an analyzer with a custom base URL (proxies, compatible
    /// servers, wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_http_client(api_key, base_url, Client::new())
    }

    /// Create an analyzer sharing an existing HTTP connection pool.
    pub fn with_http_client(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        http: Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the chat model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// The configured chat model.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self), fields(model = %self.model))]
    async fn request(&self, title: &str) -> Result<AnalysisResult> {
        let url = format!("{}/chat/completions", self.base_url);
        let prompt = user_prompt(title);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&ChatRequest {
                model: &self.model,
                messages: [
                    ChatMessage {
                        role: "system",
                        content: SYSTEM_PROMPT,
                    },
                    ChatMessage {
                        role: "user",
                        content: &prompt,
                    },
                ],
                temperature: 0.0,
                response_format: ResponseFormat {
                    kind: "json_object",
                },
            })
            .send()
            .await
            .map_err(|e| TitleLangError::AnalysisService(e.to_string()))?;

        let response = check_status(response).await?;

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| TitleLangError::AnalysisService(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                TitleLangError::MalformedResponse("response contained no message content".into())
            })?;

        debug!(bytes = content.len(), "analysis content received");
        parse_analysis(&content)
    }
}

/// Map a non-2xx response to an `AnalysisService` error, keeping the
/// service's own error message when it sends one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs);

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or(body);

    let message = match status.as_u16() {
        401 => format!("authentication failed: {detail}"),
        429 => match retry_after {
            Some(after) => format!("rate limited, retry after {after:?}: {detail}"),
            None => format!("rate limited: {detail}"),
        },
        code => format!("API error ({code}): {detail}"),
    };
    Err(TitleLangError::AnalysisService(message))
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl LanguageAnalyzer for OpenAiAnalyzer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn analyze(&self, title: &str) -> Result<AnalysisResult> {
        let start = Instant::now();
        let result = self.request(title).await;

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            telemetry::ANALYSIS_REQUESTS_TOTAL,
            "analyzer" => "openai",
            "status" => status
        )
        .increment(1);
        metrics::histogram!(telemetry::ANALYSIS_DURATION_SECONDS, "analyzer" => "openai")
            .record(start.elapsed().as_secs_f64());

        if let Err(ref e) = result {
            warn!(error = %e, kind = e.kind(), "analysis request failed");
        }
        result
    }
}
