//! POST /model_solution — structured model answer for an exam question.

use ai_gateway::types::{ModelSolution, SolutionRequest};
use axum::{Json, extract::State};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppResult, require},
    routes::solution::solution_request::SolutionBody,
};

pub async fn model_solution(
    State(state): State<AppState>,
    Json(body): Json<SolutionBody>,
) -> AppResult<ApiResponse<ModelSolution>> {
    require("question", &body.question)?;

    let solution = state
        .gateway
        .get_model_solution(&SolutionRequest {
            question_text: body.question,
        })
        .await?;

    Ok(ApiResponse::success(solution))
}
