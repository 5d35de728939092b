//! Reply extraction from a successful backend body.
//!
//! The documented format is `{"response": "..."}`, but some backends answer
//! with bare text. One parse attempt decides which case applies.

use serde_json::Value;

use super::sentinel::{EMPTY_RESPONSE, UNEXPECTED_FORMAT};

/// Field holding the generated text.
const REPLY_FIELD: &str = "response";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedReply {
    /// Well-formed payload with a text reply field (trimmed).
    Structured(String),
    /// Well-formed payload without a text reply field.
    MissingField,
    /// Not structured data; the body itself is the reply (trimmed).
    PlainText(String),
    /// Nothing but whitespace.
    Empty,
}

impl ExtractedReply {
    /// Display text: the reply, or a sentinel for the failure cases.
    pub fn into_text(self) -> String {
        match self {
            ExtractedReply::Structured(text) | ExtractedReply::PlainText(text) => text,
            ExtractedReply::MissingField => UNEXPECTED_FORMAT.to_string(),
            ExtractedReply::Empty => EMPTY_RESPONSE.to_string(),
        }
    }
}

pub fn extract_reply(raw: &str) -> ExtractedReply {
    let body = raw.trim();
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get(REPLY_FIELD).and_then(Value::as_str) {
            Some(text) => ExtractedReply::Structured(text.trim().to_string()),
            None => {
                tracing::warn!(body = %body, "Inference payload has no text reply field");
                ExtractedReply::MissingField
            }
        },
        Err(error) if body.is_empty() => {
            tracing::warn!(error = %error, "Inference backend returned an empty body");
            ExtractedReply::Empty
        }
        Err(error) => {
            tracing::debug!(error = %error, "Inference body is not JSON, using it as plain text");
            ExtractedReply::PlainText(body.to_string())
        }
    }
}
