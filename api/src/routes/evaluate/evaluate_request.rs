use serde::Deserialize;

/// Request payload for /evaluate_answer.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Captured photo as a `data:image/...;base64,...` URL.
    pub image: String,
    /// Free-form reference context, passed verbatim.
    #[serde(default)]
    pub vault_context: Option<String>,
    /// Names of documents in the student's vault.
    #[serde(default)]
    pub vault_documents: Option<Vec<String>>,
}

impl EvaluateRequest {
    /// `vault_context`, followed by the document names joined with `", "`.
    pub fn combined_vault_context(&self) -> String {
        let context = self.vault_context.as_deref().map(str::trim).unwrap_or("");
        let names = self
            .vault_documents
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        match (context.is_empty(), names.is_empty()) {
            (false, false) => format!("{context}\n{names}"),
            (false, true) => context.to_string(),
            (true, _) => names,
        }
    }
}
