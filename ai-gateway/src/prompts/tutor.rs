//! Short conversational tutor prompt.

use crate::{
    config::model_profile::ModelProfile,
    request::{ContentPart, ModelRequest},
    types::TutorQuery,
};

pub fn build(profile: &ModelProfile, query: &TutorQuery) -> ModelRequest {
    let text = format!(
        "You are an AI Tutor for {institution}. Answer this student query concisely and academically: \"{question}\".\n\
         Use a professional yet encouraging tone.",
        institution = query.institution_name.trim(),
        question = query.question.trim(),
    );

    ModelRequest {
        model: profile.model.clone(),
        parts: vec![ContentPart::Text(text)],
        response_schema: None,
        reasoning: profile.reasoning,
        temperature: profile.temperature,
    }
}
