//! Text cleaning pipeline applied before parsing strict-JSON responses.
//!
//! trim → strip fence → trim → object bounds → parse. Each step is a pure
//! function; failures come back classified.

use serde_json::{Map, Value};

use super::ContractViolation;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Removes a leading "```json" or "```" and a trailing "```".
///
/// The two ends are handled independently, so a reply that only closes a
/// fence is still cleaned.
pub fn strip_fence(text: &str) -> &str {
    let text = text
        .strip_prefix(JSON_FENCE)
        .or_else(|| text.strip_prefix(FENCE))
        .unwrap_or(text);
    text.strip_suffix(FENCE).unwrap_or(text)
}

/// Trims, strips fences and trims again.
pub fn clean(raw: &str) -> &str {
    strip_fence(raw.trim()).trim()
}

/// Rejects text that is not bracketed as a single object.
///
/// Text that opens an object but never closes it was cut off mid-stream and
/// is reported as malformed rather than as prose.
pub fn require_object_bounds(text: &str) -> Result<&str, ContractViolation> {
    if !text.starts_with('{') {
        return Err(ContractViolation::not_an_object(text));
    }
    if !text.ends_with('}') {
        return Err(ContractViolation::malformed_json("object is not closed", text));
    }
    Ok(text)
}

/// Parses the cleaned text into a JSON object.
pub fn parse_object(text: &str) -> Result<Map<String, Value>, ContractViolation> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ContractViolation::not_an_object(text)),
        Err(e) => Err(ContractViolation::malformed_json(e.to_string(), text)),
    }
}

/// Runs the full pipeline on a raw strict-JSON response.
pub fn extract_object(raw: &str) -> Result<Map<String, Value>, ContractViolation> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(ContractViolation::EmptyResponse);
    }
    let bounded = require_object_bounds(cleaned)?;
    parse_object(bounded)
}
