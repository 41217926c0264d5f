//! Unified error handling for `ai-gateway`.
//!
//! The four facade operations only ever fail with [`GatewayError`], which has
//! exactly two kinds: [`TransportError`] (the model could not be reached or
//! reported a failure) and [`DecodeError`] (the model answered, but the text
//! did not fit the requested schema). Startup problems are [`ConfigError`],
//! malformed caller input is [`InputError`].
//!
//! Small helpers for reading/validating environment variables live here too and
//! return [`ConfigError`] directly.
//!
//! All messages include the prefix `[AI Gateway]` to simplify attribution in logs.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Facade error                                                              */
/* ------------------------------------------------------------------------- */

/// Result alias for the facade operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Error returned by every gateway operation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not reach the model or the model reported a failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The model responded but its text did not decode into the requested shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl GatewayError {
    /// `true` when the network/model call itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    /// `true` when the model returned malformed structured data.
    pub fn is_decode(&self) -> bool {
        matches!(self, GatewayError::Decode(_))
    }
}

/* ------------------------------------------------------------------------- */
/* Transport errors                                                          */
/* ------------------------------------------------------------------------- */

/// Failure to complete a model call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TransportError {
    /// Underlying HTTP transport error (connect, TLS, body read).
    #[error("[AI Gateway] transport error: {0}")]
    Http(#[source] reqwest::Error),

    /// The call exceeded the configured timeout.
    #[error("[AI Gateway] model call timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI Gateway] HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    /// The provider refused the prompt (safety block or similar).
    #[error("[AI Gateway] prompt blocked by provider: {0}")]
    Blocked(String),

    /// The response envelope itself was not understood.
    #[error("[AI Gateway] invalid response envelope: {0}")]
    InvalidEnvelope(String),
}

impl TransportError {
    /// Wraps a `reqwest` error, promoting client timeouts to [`TransportError::Timeout`].
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else {
            TransportError::Http(err)
        }
    }
}

/// Non-2xx response details.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL (never contains the api key).
    pub url: String,
    /// Short snippet of the response body or the provider's error message.
    pub snippet: String,
}

/* ------------------------------------------------------------------------- */
/* Decode errors                                                             */
/* ------------------------------------------------------------------------- */

/// The model answered, but not in the requested structured shape.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No text came back where structured output was required.
    #[error("[AI Gateway] model returned no text for a structured request")]
    EmptyResponse,

    /// Text was not valid JSON for the requested schema.
    #[error("[AI Gateway] malformed structured output: {reason} (got: {snippet})")]
    Malformed {
        /// Parser message.
        reason: String,
        /// Beginning of the offending text.
        snippet: String,
    },

    /// JSON parsed, but a value violates the result contract.
    #[error("[AI Gateway] invalid structured output: {0}")]
    Invalid(String),
}

/* ------------------------------------------------------------------------- */
/* Config / input errors                                                     */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI Gateway] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (timeouts, budgets).
    #[error("[AI Gateway] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI Gateway] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_API_BASE`).
        var: &'static str,
        /// Explanation.
        reason: &'static str,
    },

    /// A `.env` file exists but could not be read or parsed.
    #[error("[AI Gateway] failed to load .env: {0}")]
    DotEnv(#[source] dotenvy::Error),

    /// The HTTP client could not be built.
    #[error("[AI Gateway] failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Caller input that cannot be turned into a model request.
#[derive(Debug, Error)]
pub enum InputError {
    /// `data:` URL did not have the `data:<mime>;base64,<payload>` shape.
    #[error("[AI Gateway] invalid data URL: {0}")]
    InvalidDataUrl(&'static str),

    /// The base64 payload could not be decoded.
    #[error("[AI Gateway] invalid base64 image payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// A required text field was blank.
    #[error("[AI Gateway] {0} must not be empty")]
    Blank(&'static str),
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> std::result::Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> std::result::Result<Option<u32>, ConfigError> {
    match env_opt(name) {
        Some(v) => v.parse::<u32>().map(Some).map_err(|_| ConfigError::InvalidNumber {
            var: name,
            reason: "expected u32",
        }),
        None => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> std::result::Result<Option<u64>, ConfigError> {
    match env_opt(name) {
        Some(v) => v.parse::<u64>().map(Some).map_err(|_| ConfigError::InvalidNumber {
            var: name,
            reason: "expected u64",
        }),
        None => Ok(None),
    }
}

/// Parses an optional `f32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a finite `f32`.
pub fn env_opt_f32(name: &'static str) -> std::result::Result<Option<f32>, ConfigError> {
    match env_opt(name) {
        Some(v) => match v.parse::<f32>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber {
                var: name,
                reason: "expected f32",
            }),
        },
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] otherwise.
pub fn validate_http_endpoint(
    var: &'static str,
    value: &str,
) -> std::result::Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}

/// Builds a short single-line snippet of a response body for logs and errors.
pub fn make_snippet(text: &str) -> String {
    let one_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut s: String = one_line.chars().take(240).collect();
    if one_line.chars().count() > 240 {
        s.push('…');
    }
    s
}
