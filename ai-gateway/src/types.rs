//! Caller-facing request and result types of the four gateway operations.
//!
//! Requests are created at call time and dropped once the result is rendered;
//! nothing here has identity or is cached.

use serde::{Deserialize, Serialize};

use crate::{error_handler::DecodeError, request::InlineImage};

/// Lowest and highest grade a scanned answer can receive.
pub const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// Input of `evaluate_answer`.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    /// Photo of the handwritten answer.
    pub image: InlineImage,
    /// Names/content of known reference documents, passed verbatim into the prompt.
    pub vault_context: String,
}

/// Graded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Grade in `[0, 10]`.
    pub score: f64,
    pub transcription: String,
    pub gap_analysis: String,
    /// Concepts the student demonstrated, in the model's order.
    pub key_points: Vec<String>,
    pub tips: String,
}

impl EvaluationResult {
    /// Checks the parts of the contract serde cannot express.
    ///
    /// # Errors
    /// [`DecodeError::Invalid`] when the score is not a finite number in `[0, 10]`.
    pub fn validate(self) -> Result<Self, DecodeError> {
        if !self.score.is_finite() || !SCORE_RANGE.contains(&self.score) {
            return Err(DecodeError::Invalid(format!(
                "score {} is outside 0..=10",
                self.score
            )));
        }
        Ok(self)
    }
}

/// Input of `generate_notes`.
#[derive(Debug, Clone)]
pub struct NotesRequest {
    /// Lecture video or page URL.
    pub source_url: String,
    pub topic: Option<String>,
}

/// Input of `ask_tutor`.
#[derive(Debug, Clone)]
pub struct TutorQuery {
    pub question: String,
    /// Institution the student belongs to; frames the tutor persona.
    pub institution_name: String,
}

/// Input of `get_model_solution`.
#[derive(Debug, Clone)]
pub struct SolutionRequest {
    pub question_text: String,
}

/// "Perfect score" answer to an exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSolution {
    pub intro: String,
    pub body: String,
    pub conclusion: String,
    /// Marking keywords, in the model's order.
    pub keywords: Vec<String>,
}
