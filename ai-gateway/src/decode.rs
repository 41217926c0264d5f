//! Response decoders: plain-text pass-through and strict JSON.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error_handler::{DecodeError, make_snippet},
    request::RawModelOutput,
};

/// Returns the model text, or `None` when it is absent or blank.
///
/// "No text" is not an error here; conversational callers decide what to
/// show instead.
pub fn decode_text(raw: RawModelOutput) -> Option<String> {
    raw.text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Parses the model text as JSON into `T`.
///
/// A single surrounding Markdown code fence (```` ```json ... ``` ````) is
/// tolerated. Missing fields and `null` list items are parse failures.
///
/// # Errors
/// - [`DecodeError::EmptyResponse`] if there is no text
/// - [`DecodeError::Malformed`] if the text does not parse into `T`
pub fn decode_json<T: DeserializeOwned>(raw: RawModelOutput) -> Result<T, DecodeError> {
    let text = decode_text(raw).ok_or(DecodeError::EmptyResponse)?;
    let body = strip_code_fence(&text);

    serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, len = body.len(), "structured output did not parse");
        DecodeError::Malformed {
            reason: e.to_string(),
            snippet: make_snippet(body),
        }
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    match rest.split_once('\n') {
        Some((_lang, body)) => body.trim(),
        None => rest.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelSolution;

    #[test]
    fn blank_text_is_none() {
        assert_eq!(decode_text(RawModelOutput::default()), None);
        assert_eq!(decode_text(RawModelOutput::text(" \n ")), None);
        assert_eq!(
            decode_text(RawModelOutput::text(" hi ")),
            Some("hi".to_string())
        );
    }

    #[test]
    fn fenced_json_is_accepted() {
        let raw = RawModelOutput::text(
            "```json\n{\"intro\":\"i\",\"body\":\"b\",\"conclusion\":\"c\",\"keywords\":[\"k\"]}\n```",
        );
        let sol: ModelSolution = decode_json(raw).unwrap();
        assert_eq!(sol.keywords, vec!["k".to_string()]);
    }

    #[test]
    fn empty_and_malformed_are_distinct() {
        let err = decode_json::<ModelSolution>(RawModelOutput::default()).unwrap_err();
        assert!(matches!(err, DecodeError::EmptyResponse));

        let err = decode_json::<ModelSolution>(RawModelOutput::text("Sure! Here it is")).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn null_keyword_and_missing_field_fail() {
        let with_null = r#"{"intro":"i","body":"b","conclusion":"c","keywords":["a",null]}"#;
        assert!(decode_json::<ModelSolution>(RawModelOutput::text(with_null)).is_err());

        let missing = r#"{"intro":"i","body":"b","keywords":[]}"#;
        assert!(decode_json::<ModelSolution>(RawModelOutput::text(missing)).is_err());
    }
}
