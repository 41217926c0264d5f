//! Prompt for grading a photographed handwritten answer.

use crate::{
    config::model_profile::ModelProfile,
    request::{ContentPart, ModelRequest, ResponseSchema},
    types::EvaluationRequest,
};

const GRADING_INSTRUCTIONS: &str = "\
Analyze this handwritten answer for a university-level exam.

TASK:
1. Accurate Transcription: Read every word carefully.
2. Score: Grade out of 10. Be strict but fair, following typical engineering marking schemes.
3. Gap Analysis: Identify EXACTLY what is missing. Mention technical keywords, diagrams that should have been there, or specific derivations.
4. Key Concepts: List the concepts the student successfully demonstrated.
5. Improvement Tips: Provide 3 actionable tips to get full marks in the next attempt.";

/// Schema of [`EvaluationResult`](crate::types::EvaluationResult).
pub fn schema() -> ResponseSchema {
    ResponseSchema::object([
        ("score", ResponseSchema::Number),
        ("transcription", ResponseSchema::String),
        ("gapAnalysis", ResponseSchema::String),
        ("keyPoints", ResponseSchema::array_of(ResponseSchema::String)),
        ("tips", ResponseSchema::String),
    ])
}

fn instruction_text(vault_context: &str) -> String {
    let vault = vault_context.trim();
    let vault = if vault.is_empty() { "None provided." } else { vault };
    format!(
        "{GRADING_INSTRUCTIONS}\n\n\
         VAULT CONTEXT (Prioritize these patterns/policies):\n{vault}\n\n\
         Return JSON ONLY."
    )
}

/// Image first, then grading instructions with the vault context.
pub fn build(profile: &ModelProfile, req: &EvaluationRequest) -> ModelRequest {
    ModelRequest {
        model: profile.model.clone(),
        parts: vec![
            req.image.to_part(),
            ContentPart::Text(instruction_text(&req.vault_context)),
        ],
        response_schema: Some(schema()),
        reasoning: profile.reasoning,
        temperature: profile.temperature,
    }
}
