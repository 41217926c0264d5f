//! POST /ask_tutor — short tutor answer framed by the student's institution.

use ai_gateway::types::TutorQuery;
use axum::{Json, extract::State};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppResult, require},
    routes::tutor::tutor_request::{TutorBody, TutorResponse},
};

pub async fn ask_tutor(
    State(state): State<AppState>,
    Json(body): Json<TutorBody>,
) -> AppResult<ApiResponse<TutorResponse>> {
    require("query", &body.query)?;
    require("institution", &body.institution)?;

    let answer = state
        .gateway
        .ask_tutor(&TutorQuery {
            question: body.query,
            institution_name: body.institution,
        })
        .await?;

    Ok(ApiResponse::success(TutorResponse { answer }))
}
