//! POST /evaluate_answer — grades a photographed handwritten answer.

use ai_gateway::{
    request::InlineImage,
    types::{EvaluationRequest, EvaluationResult},
};
use axum::{Json, extract::State};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppResult, require},
    routes::evaluate::evaluate_request::EvaluateRequest,
};

/// Handler: POST /evaluate_answer
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/evaluate_answer \
///   -H 'content-type: application/json' \
///   -d '{"image":"data:image/jpeg;base64,/9j/4AAQ...","vault_documents":["Exam_Maths_II_2023.pdf"]}'
/// ```
pub async fn evaluate_answer(
    State(state): State<AppState>,
    Json(body): Json<EvaluateRequest>,
) -> AppResult<ApiResponse<EvaluationResult>> {
    require("image", &body.image)?;
    let image = InlineImage::from_data_url(&body.image)?;

    let request = EvaluationRequest {
        vault_context: body.combined_vault_context(),
        image,
    };
    info!(
        image_bytes = request.image.bytes.len(),
        mime = %request.image.mime_type,
        "evaluate_answer requested"
    );

    let result = state.gateway.evaluate_answer(&request).await?;
    Ok(ApiResponse::success(result))
}
