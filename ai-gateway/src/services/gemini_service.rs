//! Gemini (`generateContent`) transport.
//!
//! Minimal, non-streaming client around the Gemini REST API:
//! - `POST {endpoint}/models/{model}:generateContent`
//!
//! The API key travels in the `x-goog-api-key` header so request URLs can be
//! logged as-is. Structured output (`responseMimeType` + `responseSchema`) and
//! the thinking budget are only sent when the [`ModelRequest`] asks for them.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::gateway_config::GatewayConfig,
    error_handler::{ConfigError, HttpError, TransportError, make_snippet},
    request::{ContentPart, ModelRequest, RawModelOutput, TokenUsage},
    transport::ModelTransport,
};

/// HTTP transport for the Gemini API.
///
/// Constructed from a [`GatewayConfig`]. Keeps one preconfigured
/// `reqwest::Client` (timeout + default headers) shared by all calls.
#[derive(Debug)]
pub struct GeminiTransport {
    client: reqwest::Client,
    base: String,
    timeout: Duration,
}

impl GeminiTransport {
    /// Builds the HTTP client.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if the key is not a valid header value
    /// - [`ConfigError::Client`] if the HTTP client cannot be built
    pub fn new(cfg: &GatewayConfig) -> Result<Self, ConfigError> {
        let timeout = Duration::from_secs(cfg.timeout_secs);

        let mut key = header::HeaderValue::from_str(&cfg.api_key).map_err(|_| {
            ConfigError::InvalidFormat {
                var: "GEMINI_API_KEY",
                reason: "not a valid header value",
            }
        })?;
        key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ConfigError::Client)?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();

        info!(
            endpoint = %base,
            timeout_secs = cfg.timeout_secs,
            "GeminiTransport initialized"
        );

        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base, model_path(model))
    }
}

/// Resource path of a model: `gemini-x` and `models/gemini-x` both give `models/gemini-x`.
pub(crate) fn model_path(model: &str) -> String {
    let model = model.trim();
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[async_trait]
impl ModelTransport for GeminiTransport {
    #[instrument(skip_all, fields(model = %request.model))]
    async fn send(&self, request: &ModelRequest) -> Result<RawModelOutput, TransportError> {
        let started = Instant::now();
        let url = self.url_for(&request.model);
        let body = GenerateContentRequest::from_request(request);

        debug!(
            parts = request.parts.len(),
            payload_len = request.payload_len(),
            structured = request.expects_json(),
            "POST {}", url
        );

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = provider_message(&text).unwrap_or_else(|| make_snippet(&text));

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "generateContent returned non-success status"
            );

            return Err(TransportError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            }));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        let out: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode generateContent envelope"
            );
            TransportError::InvalidEnvelope(format!(
                "serde error: {e}; expected `candidates[0].content.parts`"
            ))
        })?;

        let raw = out.into_raw()?;

        let usage = raw.usage.unwrap_or_default();
        info!(
            latency_ms = started.elapsed().as_millis(),
            has_text = raw.text.is_some(),
            finish_reason = raw.finish_reason.as_deref().unwrap_or("n/a"),
            prompt_tokens = usage.prompt_tokens,
            output_tokens = usage.output_tokens,
            thinking_tokens = usage.thinking_tokens,
            "generateContent completed"
        );

        Ok(raw)
    }
}

/// Extracts `error.message` from a Gemini error body, if present.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| make_snippet(&e.error.message))
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: WireBlob<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireBlob<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

impl<'a> GenerateContentRequest<'a> {
    pub(crate) fn from_request(req: &'a ModelRequest) -> Self {
        let parts = req
            .parts
            .iter()
            .map(|p| match p {
                ContentPart::Text(text) => WirePart::Text {
                    text: text.as_str(),
                },
                ContentPart::InlineData { mime_type, data } => WirePart::Inline {
                    inline_data: WireBlob {
                        mime_type: mime_type.as_str(),
                        data: STANDARD.encode(data),
                    },
                },
            })
            .collect();

        let config = GenerationConfig {
            response_mime_type: req.response_schema.as_ref().map(|_| "application/json"),
            response_schema: req.response_schema.as_ref().map(|s| s.to_json()),
            thinking_config: req.reasoning.map(|r| ThinkingConfig {
                thinking_budget: r.thinking_budget,
            }),
            temperature: req.temperature,
        };
        let has_config = config.response_schema.is_some()
            || config.thinking_config.is_some()
            || config.temperature.is_some();

        Self {
            contents: vec![WireContent { role: "user", parts }],
            generation_config: has_config.then_some(config),
        }
    }
}

/// Response body for `:generateContent` (only what the gateway reads).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    thoughts_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GenerateContentResponse {
    fn into_raw(self) -> Result<RawModelOutput, TransportError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            warn!(%reason, "prompt blocked by provider");
            return Err(TransportError::Blocked(reason));
        }

        let usage = self.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
            thinking_tokens: u.thoughts_token_count,
        });

        let Some(first) = self.candidates.into_iter().next() else {
            return Ok(RawModelOutput {
                text: None,
                finish_reason: None,
                usage,
            });
        };

        // Thought summaries are not part of the answer.
        let text: String = first
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text)
            .collect();

        Ok(RawModelOutput {
            text: (!text.is_empty()).then_some(text),
            finish_reason: first.finish_reason,
            usage,
        })
    }
}
