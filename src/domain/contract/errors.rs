//! Contract violations raised while turning raw model text into payloads.

use thiserror::Error;

/// Longest slice of offending text carried in a violation.
pub const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// Nothing left after trimming.
    #[error("response was empty")]
    EmptyResponse,

    /// Cleaned text does not start with `{` and end with `}`.
    #[error("response is not a complete JSON object: {preview}")]
    NotAnObject { preview: String },

    #[error("invalid JSON response: {reason}. Original text: {preview}...")]
    MalformedJson { reason: String, preview: String },

    /// Parsed, but a required key is absent, mistyped or out of bounds.
    #[error("unexpected response format: field '{field}' {reason}")]
    ShapeMismatch { field: String, reason: String },
}

impl ContractViolation {
    pub fn not_an_object(text: &str) -> Self {
        Self::NotAnObject {
            preview: preview(text),
        }
    }

    pub fn malformed_json(reason: impl Into<String>, text: &str) -> Self {
        Self::MalformedJson {
            reason: reason.into(),
            preview: preview(text),
        }
    }

    pub fn shape_mismatch(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short user-facing description.
    pub fn summary(&self) -> &'static str {
        match self {
            ContractViolation::EmptyResponse => "The assistant returned an empty answer.",
            ContractViolation::NotAnObject { .. } | ContractViolation::MalformedJson { .. } => {
                "The assistant's answer could not be read."
            }
            ContractViolation::ShapeMismatch { .. } => {
                "The assistant's answer was not in the expected format."
            }
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_capped_by_characters() {
        let text = "é".repeat(300);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn short_text_preview_is_whole() {
        assert_eq!(preview("{\"a\""), "{\"a\"");
    }

    #[test]
    fn malformed_json_carries_preview() {
        let long = format!("{{{}", "x".repeat(500));
        match ContractViolation::malformed_json("EOF", &long) {
            ContractViolation::MalformedJson { preview, .. } => {
                assert_eq!(preview.len(), PREVIEW_CHARS)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn shape_mismatch_display() {
        let err = ContractViolation::shape_mismatch("idealChoiceIndex", "is missing");
        assert_eq!(
            err.to_string(),
            "unexpected response format: field 'idealChoiceIndex' is missing"
        );
    }
}
