//! Prompt for a model ("perfect score") answer to a subjective exam question.

use crate::{
    config::model_profile::ModelProfile,
    request::{ContentPart, ModelRequest, ResponseSchema},
    types::SolutionRequest,
};

/// Schema of [`ModelSolution`](crate::types::ModelSolution).
pub fn schema() -> ResponseSchema {
    ResponseSchema::object([
        ("intro", ResponseSchema::String),
        ("body", ResponseSchema::String),
        ("conclusion", ResponseSchema::String),
        ("keywords", ResponseSchema::array_of(ResponseSchema::String)),
    ])
}

pub fn build(profile: &ModelProfile, req: &SolutionRequest) -> ModelRequest {
    let text = format!(
        "Question: \"{question}\"\n\n\
         Generate a 'Perfect Score' solution for a university subjective exam.\n\
         STRUCTURE:\n\
         - Introduction: Context and definitions.\n\
         - Main Body: Detailed points with logical flow.\n\
         - Conclusion: Summary/Significance.\n\
         - High-Impact Keywords: List 5-8 words that markers look for.\n\n\
         Ensure the content is technically rigorous and uses appropriate engineering/scientific terminology.\n\
         Return JSON ONLY.",
        question = req.question_text.trim(),
    );

    ModelRequest {
        model: profile.model.clone(),
        parts: vec![ContentPart::Text(text)],
        response_schema: Some(schema()),
        reasoning: profile.reasoning,
        temperature: profile.temperature,
    }
}
