use serde::Deserialize;

/// Request payload for /model_solution.
#[derive(Debug, Deserialize)]
pub struct SolutionBody {
    /// Exam question text.
    pub question: String,
}
