use crate::request::ReasoningEffort;

/// A named model configuration used by one class of requests.
///
/// The gateway keeps two of these:
///
/// - **deep**: schema-validated tasks (answer grading, model solutions).
///   Carries a reasoning budget so the model deliberates before answering.
/// - **fast**: free-text tasks shown verbatim (lecture notes, tutor chat).
///   No reasoning hint, optimised for latency.
///
/// Model identifiers are configuration, not protocol: swapping them does not
/// change any gateway contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    /// Model identifier (e.g. `"gemini-3-pro-preview"`).
    pub model: String,

    /// Optional reasoning-effort hint attached to every request of this profile.
    pub reasoning: Option<ReasoningEffort>,

    /// Optional sampling temperature.
    pub temperature: Option<f32>,
}

impl ModelProfile {
    /// Deep-reasoning profile with the given thinking budget.
    pub fn deep(model: impl Into<String>, thinking_budget: u32) -> Self {
        Self {
            model: model.into(),
            reasoning: Some(ReasoningEffort::high(thinking_budget)),
            temperature: None,
        }
    }

    /// Sets (or clears) the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Low-latency profile without a reasoning hint.
    pub fn fast(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reasoning: None,
            temperature: None,
        }
    }
}
