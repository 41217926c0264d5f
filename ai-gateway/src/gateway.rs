//! Gateway facade: the four operations the UI layer calls.
//!
//! Each operation is a straight `build → send → decode` composition with no
//! state shared between calls apart from the read-only transport and profiles.
//! Construct once, wrap in `Arc`, and hand clones to dependents; concurrent
//! calls are fine and complete in whatever order the model answers.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_gateway::config::default_config::config_from_env;
//! use ai_gateway::gateway::StudyGateway;
//! use ai_gateway::services::gemini_service::GeminiTransport;
//! use ai_gateway::types::TutorQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = config_from_env()?;
//!     let transport = Arc::new(GeminiTransport::new(&cfg)?);
//!     let gateway = StudyGateway::new(transport, cfg.deep.clone(), cfg.fast.clone());
//!
//!     let answer = gateway
//!         .ask_tutor(&TutorQuery {
//!             question: "What is a deadlock?".into(),
//!             institution_name: "Nirma University".into(),
//!         })
//!         .await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    config::model_profile::ModelProfile,
    decode::{decode_json, decode_text},
    error_handler::{GatewayError, Result},
    prompts::{evaluation, notes, solution, tutor},
    request::{ModelRequest, RawModelOutput},
    transport::ModelTransport,
    types::{
        EvaluationRequest, EvaluationResult, ModelSolution, NotesRequest, SolutionRequest,
        TutorQuery,
    },
};

/// Shown instead of an empty tutor answer.
pub const TUTOR_FALLBACK: &str = "I couldn't find an answer for that right now.";

/// The AI request/response gateway.
#[derive(Clone)]
pub struct StudyGateway {
    transport: Arc<dyn ModelTransport>,
    deep: ModelProfile,
    fast: ModelProfile,
}

impl StudyGateway {
    /// Creates a gateway.
    ///
    /// - `deep`: profile for grading and model solutions (schema + reasoning budget).
    /// - `fast`: profile for lecture notes and tutor chat (free text).
    pub fn new(transport: Arc<dyn ModelTransport>, deep: ModelProfile, fast: ModelProfile) -> Self {
        Self {
            transport,
            deep,
            fast,
        }
    }

    /// Grades a photographed handwritten answer.
    ///
    /// # Errors
    /// - [`GatewayError::Transport`] if the model call fails
    /// - [`GatewayError::Decode`] if the answer is not a complete, in-range result
    #[instrument(skip_all, fields(vault_len = req.vault_context.len()))]
    pub async fn evaluate_answer(&self, req: &EvaluationRequest) -> Result<EvaluationResult> {
        let request = evaluation::build(&self.deep, req);
        let raw = self.send(&request).await?;
        let result = decode_json::<EvaluationResult>(raw)
            .and_then(EvaluationResult::validate)
            .inspect_err(|e| warn!(error = %e, "evaluation output rejected"))?;

        info!(score = result.score, key_points = result.key_points.len(), "answer evaluated");
        Ok(result)
    }

    /// Produces a Markdown study guide for a lecture.
    ///
    /// An empty model answer yields an empty string; only transport failures are errors.
    ///
    /// # Errors
    /// [`GatewayError::Transport`] if the model call fails.
    #[instrument(skip_all, fields(url = %req.source_url))]
    pub async fn generate_notes(&self, req: &NotesRequest) -> Result<String> {
        let request = notes::build(&self.fast, req);
        let raw = self.send(&request).await?;
        Ok(decode_text(raw).unwrap_or_default())
    }

    /// Answers a student question; never returns an empty string.
    ///
    /// # Errors
    /// [`GatewayError::Transport`] if the model call fails.
    #[instrument(skip_all, fields(institution = %query.institution_name))]
    pub async fn ask_tutor(&self, query: &TutorQuery) -> Result<String> {
        let request = tutor::build(&self.fast, query);
        let raw = self.send(&request).await?;
        match decode_text(raw) {
            Some(answer) => Ok(answer),
            None => {
                warn!("tutor returned no text, substituting fallback");
                Ok(TUTOR_FALLBACK.to_string())
            }
        }
    }

    /// Writes a model answer for an exam question.
    ///
    /// # Errors
    /// - [`GatewayError::Transport`] if the model call fails
    /// - [`GatewayError::Decode`] if the answer does not match the solution schema
    #[instrument(skip_all, fields(question_len = req.question_text.len()))]
    pub async fn get_model_solution(&self, req: &SolutionRequest) -> Result<ModelSolution> {
        let request = solution::build(&self.deep, req);
        let raw = self.send(&request).await?;
        let sol = decode_json::<ModelSolution>(raw)
            .inspect_err(|e| warn!(error = %e, "solution output rejected"))?;

        info!(keywords = sol.keywords.len(), "model solution generated");
        Ok(sol)
    }

    /* --------------------- Internals --------------------- */

    async fn send(&self, request: &ModelRequest) -> Result<RawModelOutput> {
        self.transport
            .send(request)
            .await
            .inspect_err(|e| warn!(model = %request.model, error = %e, "model call failed"))
            .map_err(GatewayError::from)
    }
}
