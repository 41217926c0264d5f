use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body of every route, success or failure.
///
/// ```json
/// { "success": true,  "data": { ... } }
/// { "success": false, "error": { "code": "AI_UNREACHABLE", "message": "..." } }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Machine-readable failure codes. The UI switches on these, so the
/// serialized names are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    UnsupportedMediaType,
    UnprocessableEntity,
    PayloadTooLarge,
    /// The model could not be reached or refused the call.
    AiUnreachable,
    AiTimeout,
    /// The model answered, but not in the expected shape.
    AiUnexpectedAnswer,
    ConfigError,
    BindError,
    ServerError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::AiUnreachable | ErrorCode::AiUnexpectedAnswer => StatusCode::BAD_GATEWAY,
            ErrorCode::AiTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::ConfigError | ErrorCode::BindError | ErrorCode::ServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Code for an axum extractor rejection status, if it is one we rewrap.
    pub fn for_rejection(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST => Some(ErrorCode::BadRequest),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Some(ErrorCode::UnsupportedMediaType),
            StatusCode::UNPROCESSABLE_ENTITY => Some(ErrorCode::UnprocessableEntity),
            StatusCode::PAYLOAD_TOO_LARGE => Some(ErrorCode::PayloadTooLarge),
            _ => None,
        }
    }
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldIssue>,
}

/// Points the client at the request field that caused a failure.
#[derive(Debug, Default, Serialize)]
pub struct FieldIssue {
    /// Request field name, e.g. `image`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FieldIssue {
    pub fn field(name: &str) -> Self {
        Self {
            path: Some(name.to_string()),
            hint: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: ErrorCode, message: impl Into<String>, details: Vec<FieldIssue>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
                details,
            }),
        }
    }
}

/// Successes are 200; failures take the status of their [`ErrorCode`].
impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self
            .error
            .as_ref()
            .map_or(StatusCode::OK, |e| e.code.status());
        (status, Json(self)).into_response()
    }
}
