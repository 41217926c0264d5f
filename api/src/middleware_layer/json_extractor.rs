use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiResponse, ErrorCode, FieldIssue};

const REQUEST_ID: &str = "x-request-id";

/// Request fields the routes accept.
const KNOWN_FIELDS: [&str; 8] = [
    "image",
    "vault_context",
    "vault_documents",
    "url",
    "topic",
    "query",
    "institution",
    "question",
];

/// Serde names the offending field in backticks: ``missing field `query` ``.
fn field_in(rejection: &str) -> Option<&'static str> {
    KNOWN_FIELDS
        .into_iter()
        .find(|key| rejection.contains(&format!("`{key}`")))
}

fn hint_for(rejection: &str) -> Option<String> {
    let hint = if rejection.contains("missing field") {
        "Add the missing field to the JSON body."
    } else if rejection.contains("expected a sequence") {
        "Expected an array of strings, e.g. [\"Notes.pdf\"]."
    } else if rejection.contains("length limit exceeded") {
        "Send a smaller image or raise API_MAX_BODY_BYTES."
    } else if rejection.contains("Content-Type") {
        "Send the body with `content-type: application/json`."
    } else {
        return None;
    };
    Some(hint.to_string())
}

fn request_id(headers: &mut HeaderMap) -> String {
    if let Some(id) = headers
        .get(REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return id.to_string();
    }
    let id = format!("req-{}", Utc::now().timestamp_micros());
    if let Ok(value) = HeaderValue::from_str(&id) {
        headers.insert(REQUEST_ID, value);
    }
    id
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Turns axum's plain-text extractor rejections (400/413/415/422) into the
/// [`ApiResponse`] envelope. Responses that are already JSON pass through.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let Some(code) = ErrorCode::for_rejection(res.status()) else {
        return res;
    };
    if is_json(res.headers()) {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let rejection = String::from_utf8_lossy(&bytes).trim().to_string();

    let req_id = request_id(&mut parts.headers);
    debug!(%req_id, ?code, %rejection, "request body rejected");

    let issue = FieldIssue {
        path: field_in(&rejection).map(str::to_string),
        hint: hint_for(&rejection),
    };
    let envelope = ApiResponse::failure(code, rejection, vec![issue]);
    let body = match serde_json::to_vec(&envelope) {
        Ok(json) => json,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}
