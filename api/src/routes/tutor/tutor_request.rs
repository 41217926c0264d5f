use serde::{Deserialize, Serialize};

/// Request payload for /ask_tutor.
#[derive(Debug, Deserialize)]
pub struct TutorBody {
    /// The student's question.
    pub query: String,
    /// Institution name from the student's profile.
    pub institution: String,
}

/// Response payload for /ask_tutor.
#[derive(Debug, Serialize)]
pub struct TutorResponse {
    /// Never empty.
    pub answer: String,
}
