//! POST /generate_notes — lecture URL to Markdown study guide.

use ai_gateway::types::NotesRequest;
use axum::{Json, extract::State};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppResult, require},
    routes::notes::notes_request::{NotesBody, NotesResponse},
};

pub async fn generate_notes(
    State(state): State<AppState>,
    Json(body): Json<NotesBody>,
) -> AppResult<ApiResponse<NotesResponse>> {
    require("url", &body.url)?;

    let notes = state
        .gateway
        .generate_notes(&NotesRequest {
            source_url: body.url,
            topic: body.topic,
        })
        .await?;

    Ok(ApiResponse::success(NotesResponse { notes }))
}
