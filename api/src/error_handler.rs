use ai_gateway::error_handler::{ConfigError, GatewayError, InputError, TransportError};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

use crate::core::http::response_envelope::{ApiResponse, ErrorCode, FieldIssue};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        field: Option<&'static str>,
    },

    // --- Model ---
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AppError {
    pub fn bad_request(field: &'static str, message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            field: Some(field),
        }
    }

    /// Wire code; the HTTP status follows from it.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::Bind { .. } => ErrorCode::BindError,
            AppError::Server(_) => ErrorCode::ServerError,
            AppError::BadRequest { .. } => ErrorCode::BadRequest,
            AppError::Gateway(GatewayError::Transport(TransportError::Timeout(_))) => {
                ErrorCode::AiTimeout
            }
            AppError::Gateway(GatewayError::Transport(_)) => ErrorCode::AiUnreachable,
            AppError::Gateway(GatewayError::Decode(_)) => ErrorCode::AiUnexpectedAnswer,
        }
    }

    /// Message shown to the student; the technical cause goes to the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Gateway(GatewayError::Transport(_)) => {
                "Could not reach the AI. Please try again.".into()
            }
            AppError::Gateway(GatewayError::Decode(_)) => {
                "The AI gave an unexpected answer. Please try again.".into()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        if code.status().is_server_error() {
            warn!(?code, error = %self, "request failed");
        }
        let details = match &self {
            AppError::BadRequest {
                field: Some(field), ..
            } => vec![FieldIssue::field(field)],
            _ => Vec::new(),
        };
        ApiResponse::failure(code, self.public_message(), details).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        let field = match &err {
            InputError::Blank(field) => *field,
            _ => "image",
        };
        AppError::bad_request(field, err.to_string())
    }
}

/// Rejects blank required text fields.
pub fn require(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(InputError::Blank(field).into())
    } else {
        Ok(())
    }
}
