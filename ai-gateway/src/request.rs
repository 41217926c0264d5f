//! Provider-neutral request/response value objects.
//!
//! Prompt builders produce a [`ModelRequest`]; the transport turns it into the
//! wire format. Everything here is plain data: `Clone + PartialEq + Serialize`
//! so two builds with the same inputs can be compared as snapshots.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error_handler::InputError;

/// One piece of model input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text(String),
    /// Inline binary (e.g. a captured JPEG).
    InlineData {
        mime_type: String,
        #[serde(serialize_with = "serialize_base64")]
        data: Vec<u8>,
    },
}

fn serialize_base64<S: serde::Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&STANDARD.encode(data))
}

/// Reasoning-effort hint: how much internal deliberation the model may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReasoningEffort {
    /// Token budget for the model's internal reasoning.
    pub thinking_budget: u32,
}

impl ReasoningEffort {
    pub fn high(thinking_budget: u32) -> Self {
        Self { thinking_budget }
    }
}

/// Typed structured-output schema.
///
/// Serialises to the provider schema dialect: upper-case `type`, `properties`,
/// `required` and `propertyOrdering` for objects, `items` for arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSchema {
    String,
    Number,
    Array(Box<ResponseSchema>),
    /// Ordered `(name, schema)` pairs. Every field is required.
    Object(Vec<(String, ResponseSchema)>),
}

impl ResponseSchema {
    /// Object schema from `(name, schema)` pairs, order preserved.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, ResponseSchema)>,
        K: Into<String>,
    {
        ResponseSchema::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array_of(item: ResponseSchema) -> Self {
        ResponseSchema::Array(Box::new(item))
    }

    /// Provider JSON representation.
    pub fn to_json(&self) -> Value {
        match self {
            ResponseSchema::String => json!({ "type": "STRING" }),
            ResponseSchema::Number => json!({ "type": "NUMBER" }),
            ResponseSchema::Array(item) => json!({ "type": "ARRAY", "items": item.to_json() }),
            ResponseSchema::Object(fields) => {
                let mut properties = Map::new();
                for (name, schema) in fields {
                    properties.insert(name.clone(), schema.to_json());
                }
                let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
                json!({
                    "type": "OBJECT",
                    "properties": properties,
                    "required": names,
                    "propertyOrdering": names,
                })
            }
        }
    }
}

impl Serialize for ResponseSchema {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(s)
    }
}

/// A fully-specified model call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRequest {
    /// Target model identifier.
    pub model: String,
    /// Ordered content parts of the single user turn.
    pub parts: Vec<ContentPart>,
    /// Structured-output schema; `None` for free-text requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<ResponseSchema>,
    /// Reasoning-effort hint; `None` for low-latency requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningEffort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ModelRequest {
    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }

    /// Total bytes of text and inline data, for logging.
    pub fn payload_len(&self) -> usize {
        self.parts
            .iter()
            .map(|p| match p {
                ContentPart::Text(t) => t.len(),
                ContentPart::InlineData { data, .. } => data.len(),
            })
            .sum()
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub thinking_tokens: Option<u32>,
}

/// What the transport hands back: the model's raw text, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawModelOutput {
    pub text: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl RawModelOutput {
    /// Output carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// An image to embed inline in a request.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InlineImage {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            mime_type: "image/jpeg".into(),
            bytes,
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` URL as produced by a camera canvas.
    ///
    /// # Errors
    /// [`InputError::InvalidDataUrl`] for a wrong shape, [`InputError::InvalidBase64`]
    /// when the payload does not decode.
    pub fn from_data_url(url: &str) -> Result<Self, InputError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or(InputError::InvalidDataUrl("missing `data:` prefix"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or(InputError::InvalidDataUrl("missing `,` separator"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(InputError::InvalidDataUrl("only base64 payloads are supported"))?;
        if !mime_type.starts_with("image/") {
            return Err(InputError::InvalidDataUrl("mime type must be image/*"));
        }
        let bytes = STANDARD.decode(payload.trim())?;
        if bytes.is_empty() {
            return Err(InputError::Blank("image"));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub(crate) fn to_part(&self) -> ContentPart {
        ContentPart::InlineData {
            mime_type: self.mime_type.clone(),
            data: self.bytes.clone(),
        }
    }
}
