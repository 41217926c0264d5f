//! Prompt for turning a lecture URL into a study guide.

use crate::{
    config::model_profile::ModelProfile,
    request::{ContentPart, ModelRequest},
    types::NotesRequest,
};

const DEFAULT_TOPIC: &str = "Academic Lecture";

pub fn build(profile: &ModelProfile, req: &NotesRequest) -> ModelRequest {
    let topic = req
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TOPIC);

    let text = format!(
        "Act as a senior professor. Watch/Analyze the content of this lecture: {url}\n\
         Topic: {topic}\n\n\
         Generate a MASTER STUDY GUIDE:\n\
         1. CONCEPTUAL TIMESTAMPS: Break the video into logical segments (e.g., [00:00 - 05:00] Introduction to X).\n\
         2. CORE THEMES: 3-5 major pillars discussed.\n\
         3. DETAILED NOTES: Bulleted technical breakdown.\n\
         4. EXAM PROBABILITY: Rate the likelihood of this appearing in an End-Sem exam.\n\
         5. MODEL QUESTIONS: Provide 2 short (2-mark) and 1 long (10-mark) question based on this video.\n\n\
         Format using clean Markdown with bold headers.",
        url = req.source_url.trim(),
    );

    ModelRequest {
        model: profile.model.clone(),
        parts: vec![ContentPart::Text(text)],
        response_schema: None,
        reasoning: profile.reasoning,
        temperature: profile.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_defaults_when_missing_or_blank() {
        let profile = ModelProfile::fast("fast");
        for topic in [None, Some("  ".to_string())] {
            let req = build(
                &profile,
                &NotesRequest {
                    source_url: "https://youtu.be/x".into(),
                    topic,
                },
            );
            let ContentPart::Text(text) = &req.parts[0] else {
                panic!("text part expected");
            };
            assert!(text.contains("Topic: Academic Lecture"));
            assert!(text.contains("https://youtu.be/x"));
        }
    }

    #[test]
    fn free_text_request_has_no_schema() {
        let req = build(
            &ModelProfile::fast("fast"),
            &NotesRequest {
                source_url: "u".into(),
                topic: Some("Graphs".into()),
            },
        );
        assert!(req.response_schema.is_none());
        assert!(req.reasoning.is_none());
        assert_eq!(req.parts.len(), 1);
    }
}
