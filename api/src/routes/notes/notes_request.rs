use serde::{Deserialize, Serialize};

/// Request payload for /generate_notes.
#[derive(Debug, Deserialize)]
pub struct NotesBody {
    /// Lecture URL (e.g. a YouTube link).
    pub url: String,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Response payload for /generate_notes.
#[derive(Debug, Serialize)]
pub struct NotesResponse {
    /// Markdown study guide.
    pub notes: String,
}
