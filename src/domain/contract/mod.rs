//! Contract module - the strict-JSON protocol enforced on model output.
//!
//! The model is asked for a single JSON object but nothing binds it to that.
//! Raw text goes through a cleaning pipeline, is parsed, then checked
//! against the shape registered for its request kind before a typed payload
//! is built. Free-form kinds only need non-empty text.

mod clean;
mod errors;
mod payload;
mod shape;

pub use clean::{clean, extract_object, parse_object, require_object_bounds, strip_fence};
pub use errors::{preview, ContractViolation, PREVIEW_CHARS};
pub use payload::{
    DialogueLine, Feedback, FromPayload, ParsedPayload, Scenario, Story, TopicDetail, TopicList,
    TopicSummary,
};
pub use shape::{shape_for, FieldRule, FieldType, ResponseShape};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::prompt::RequestKind;

/// Turns raw model text into the payload `kind` promises.
pub fn parse_and_validate(kind: RequestKind, raw: &str) -> Result<ParsedPayload, ContractViolation> {
    match kind {
        RequestKind::FreeformChat => parse_text(raw).map(ParsedPayload::Text),
        RequestKind::ScenarioGenerate => parse_strict(kind, raw).map(ParsedPayload::Scenario),
        RequestKind::ScenarioFeedback => parse_strict(kind, raw).map(ParsedPayload::Feedback),
        RequestKind::DialogueOpen | RequestKind::DialogueContinue => {
            parse_strict(kind, raw).map(ParsedPayload::DialogueLine)
        }
        RequestKind::StoryGenerate => parse_strict(kind, raw).map(ParsedPayload::Story),
        RequestKind::TopicListGenerate => parse_strict(kind, raw).map(ParsedPayload::TopicList),
        RequestKind::TopicDetailGenerate => parse_strict(kind, raw).map(ParsedPayload::TopicDetail),
    }
}

/// Typed variant of [`parse_and_validate`].
pub fn parse_as<T: FromPayload>(kind: RequestKind, raw: &str) -> Result<T, ContractViolation> {
    let payload = parse_and_validate(kind, raw)?;
    let label = payload.label();
    T::from_payload(payload).ok_or_else(|| {
        ContractViolation::shape_mismatch(
            "root",
            format!("{} response produced an unexpected {} payload", kind, label),
        )
    })
}

fn parse_text(raw: &str) -> Result<String, ContractViolation> {
    let text = raw.trim();
    if text.is_empty() {
        Err(ContractViolation::EmptyResponse)
    } else {
        Ok(text.to_string())
    }
}

fn parse_strict<T: DeserializeOwned>(kind: RequestKind, raw: &str) -> Result<T, ContractViolation> {
    let shape = shape_for(kind).ok_or_else(|| {
        ContractViolation::shape_mismatch("root", format!("no shape registered for {}", kind))
    })?;
    let object = extract_object(raw)?;
    shape.validate(&object)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ContractViolation::shape_mismatch("root", e.to_string()))
}
