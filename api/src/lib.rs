//! HTTP surface of the study assistant.
//!
//! The UI talks to the model only through these routes, which forward to the
//! four [`ai_gateway::gateway::StudyGateway`] operations.

use std::env;

pub mod core {
    pub mod app_state;
    pub mod http {
        pub mod response_envelope;
    }
}
pub mod error_handler;
mod middleware_layer {
    pub mod json_extractor;
}
mod routes;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

pub use crate::core::app_state::AppState;
pub use crate::error_handler::AppError;
use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        evaluate::evaluate_route::evaluate_answer, health_route::health,
        notes::notes_route::generate_notes, solution::solution_route::model_solution,
        tutor::tutor_route::ask_tutor,
    },
};

const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

/// Builds the router. Exposed separately from [`start`] for in-process tests.
///
/// Bodies above `state.max_body_bytes` are rejected with 413 `PAYLOAD_TOO_LARGE`.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .route("/evaluate_answer", post(evaluate_answer))
        .route("/generate_notes", post(generate_notes))
        .route("/ask_tutor", post(ask_tutor))
        .route("/model_solution", post(model_solution))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Binds `API_ADDRESS` (default `127.0.0.1:8080`) and serves until Ctrl+C.
///
/// # Errors
/// [`AppError::Bind`] if the address cannot be bound, [`AppError::Server`] if
/// the server stops with an I/O error.
pub async fn start(state: AppState) -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(|source| AppError::Bind {
            addr: host_url.clone(),
            source,
        })?;

    info!(address = %host_url, "study assistant API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("study assistant API stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
