//! Expected-shape descriptors for every strict-JSON request kind.
//!
//! Validation is manual against static descriptors so that every failure
//! names the offending field.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use super::ContractViolation;
use crate::domain::prompt::RequestKind;

/// Type constraint on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A string that is not blank.
    Text,
    /// An array of non-blank strings with a length bound.
    TextList { min: usize, max: Option<usize> },
    /// A non-negative integer that indexes into the named array field.
    IndexInto { array: &'static str },
    /// An array of objects, each matching `fields`.
    ObjectList {
        min: usize,
        fields: &'static [FieldRule],
    },
}

/// A required key and its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldRule {
    const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// The required keys of one response kind. Extra keys are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseShape {
    pub fields: &'static [FieldRule],
}

const SCENARIO_FIELDS: &[FieldRule] = &[
    FieldRule::new("scenario", FieldType::Text),
    FieldRule::new(
        "choices",
        FieldType::TextList {
            min: 2,
            max: Some(3),
        },
    ),
    FieldRule::new("idealChoiceIndex", FieldType::IndexInto { array: "choices" }),
];

const FEEDBACK_FIELDS: &[FieldRule] = &[FieldRule::new("feedback", FieldType::Text)];

const DIALOGUE_LINE_FIELDS: &[FieldRule] = &[FieldRule::new("ai_line", FieldType::Text)];

const STORY_FIELDS: &[FieldRule] = &[
    FieldRule::new("title", FieldType::Text),
    FieldRule::new("story_text", FieldType::Text),
    FieldRule::new(
        "reflection_questions",
        FieldType::TextList { min: 1, max: None },
    ),
];

const TOPIC_FIELDS: &[FieldRule] = &[
    FieldRule::new("title", FieldType::Text),
    FieldRule::new("description", FieldType::Text),
];

const TOPIC_LIST_FIELDS: &[FieldRule] = &[FieldRule::new(
    "topics",
    FieldType::ObjectList {
        min: 1,
        fields: TOPIC_FIELDS,
    },
)];

const TOPIC_DETAIL_FIELDS: &[FieldRule] = &[FieldRule::new("content", FieldType::Text)];

static SHAPES: Lazy<HashMap<RequestKind, ResponseShape>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kind in RequestKind::all() {
        let fields = match kind {
            RequestKind::FreeformChat => continue,
            RequestKind::ScenarioGenerate => SCENARIO_FIELDS,
            RequestKind::ScenarioFeedback => FEEDBACK_FIELDS,
            RequestKind::DialogueOpen | RequestKind::DialogueContinue => DIALOGUE_LINE_FIELDS,
            RequestKind::StoryGenerate => STORY_FIELDS,
            RequestKind::TopicListGenerate => TOPIC_LIST_FIELDS,
            RequestKind::TopicDetailGenerate => TOPIC_DETAIL_FIELDS,
        };
        map.insert(*kind, ResponseShape { fields });
    }
    map
});

/// Shape for a strict-JSON kind; `None` for free-form kinds.
pub fn shape_for(kind: RequestKind) -> Option<&'static ResponseShape> {
    SHAPES.get(&kind)
}

impl ResponseShape {
    /// Checks every rule against a parsed object.
    pub fn validate(&self, object: &Map<String, Value>) -> Result<(), ContractViolation> {
        validate_fields(self.fields, object, "")
    }
}

fn validate_fields(
    rules: &[FieldRule],
    object: &Map<String, Value>,
    prefix: &str,
) -> Result<(), ContractViolation> {
    for rule in rules {
        let path = format!("{}{}", prefix, rule.name);
        let value = object
            .get(rule.name)
            .ok_or_else(|| ContractViolation::shape_mismatch(&path, "is missing"))?;
        match rule.ty {
            FieldType::Text => require_text(value, &path)?,
            FieldType::TextList { min, max } => {
                let items = require_array(value, &path, min, max)?;
                for (i, item) in items.iter().enumerate() {
                    require_text(item, &format!("{}[{}]", path, i))?;
                }
            }
            FieldType::IndexInto { array } => {
                let index = value.as_u64().ok_or_else(|| {
                    ContractViolation::shape_mismatch(&path, "must be a non-negative integer")
                })?;
                let len = object
                    .get(array)
                    .and_then(Value::as_array)
                    .map(Vec::len)
                    .unwrap_or(0);
                if index >= len as u64 {
                    return Err(ContractViolation::shape_mismatch(
                        &path,
                        format!("{} does not index into '{}' of length {}", index, array, len),
                    ));
                }
            }
            FieldType::ObjectList { min, fields } => {
                let items = require_array(value, &path, min, None)?;
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    let inner = item.as_object().ok_or_else(|| {
                        ContractViolation::shape_mismatch(&item_path, "must be an object")
                    })?;
                    validate_fields(fields, inner, &format!("{}.", item_path))?;
                }
            }
        }
    }
    Ok(())
}

fn require_text(value: &Value, path: &str) -> Result<(), ContractViolation> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        Some(_) => Err(ContractViolation::shape_mismatch(path, "is blank")),
        None => Err(ContractViolation::shape_mismatch(path, "must be a string")),
    }
}

fn require_array<'v>(
    value: &'v Value,
    path: &str,
    min: usize,
    max: Option<usize>,
) -> Result<&'v Vec<Value>, ContractViolation> {
    let items = value
        .as_array()
        .ok_or_else(|| ContractViolation::shape_mismatch(path, "must be an array"))?;
    if items.len() < min {
        return Err(ContractViolation::shape_mismatch(
            path,
            format!("needs at least {} items, got {}", min, items.len()),
        ));
    }
    if let Some(max) = max {
        if items.len() > max {
            return Err(ContractViolation::shape_mismatch(
                path,
                format!("allows at most {} items, got {}", max, items.len()),
            ));
        }
    }
    Ok(items)
}
