//! Typed payloads, one per response shape.
//!
//! Field names follow the wire keys the model is asked to produce.

use serde::{Deserialize, Serialize};

/// A roleplay scenario with 2-3 choices, one of them ideal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "scenario")]
    pub text: String,
    pub choices: Vec<String>,
    #[serde(rename = "idealChoiceIndex")]
    pub ideal_choice_index: usize,
}

impl Scenario {
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    pub fn ideal_choice(&self) -> Option<&str> {
        self.choice(self.ideal_choice_index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "feedback")]
    pub text: String,
}

/// One line spoken by the simulated partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    #[serde(rename = "ai_line")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    #[serde(rename = "story_text")]
    pub text: String,
    #[serde(rename = "reflection_questions")]
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicList {
    pub topics: Vec<TopicSummary>,
}

/// Long-form topic content. `content` is an HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetail {
    pub content: String,
}

/// A validated response. Only ever built from text that passed the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPayload {
    Text(String),
    Scenario(Scenario),
    Feedback(Feedback),
    DialogueLine(DialogueLine),
    Story(Story),
    TopicList(TopicList),
    TopicDetail(TopicDetail),
}

impl ParsedPayload {
    /// Name of the variant, for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ParsedPayload::Text(_) => "text",
            ParsedPayload::Scenario(_) => "scenario",
            ParsedPayload::Feedback(_) => "feedback",
            ParsedPayload::DialogueLine(_) => "dialogue_line",
            ParsedPayload::Story(_) => "story",
            ParsedPayload::TopicList(_) => "topic_list",
            ParsedPayload::TopicDetail(_) => "topic_detail",
        }
    }
}

/// Extracts a concrete payload type from a [`ParsedPayload`].
pub trait FromPayload: Sized {
    fn from_payload(payload: ParsedPayload) -> Option<Self>;
}

impl FromPayload for String {
    fn from_payload(payload: ParsedPayload) -> Option<Self> {
        match payload {
            ParsedPayload::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl FromPayload for Scenario {
    fn from_payload(payload: ParsedPayload) -> Option<Self> {
        match payload {
            ParsedPayload::Scenario(scenario) => Some(scenario),
            _ => None,
        }
    }
}

impl FromPayload for Feedback {
    fn from_payload(payload: ParsedPayload) -> Option<Self> {
        match payload {
            ParsedPayload::Feedback(feedback) => Some(feedback),
            _ => None,
        }
    }
}

impl FromPayload for DialogueLine {
    fn from_payload(payload: ParsedPayload) -> Option<Self> {
        match payload {
            ParsedPayload::DialogueLine(line) => Some(line),
            _ => None,
        }
    }
}

impl FromPayload for Story {
    fn from_payload(payload: ParsedPayload) -> Option<Self> {
        match payload {
            ParsedPayload::Story(story) => Some(story),
            _ => None,
        }
    }
}

impl FromPayload for TopicList {
    fn from_payload(payload: ParsedPayload) -> Option<Self> {
        match payload {
            ParsedPayload::TopicList(list) => Some(list),
            _ => None,
        }
    }
}

impl FromPayload for TopicDetail {
    fn from_payload(payload: ParsedPayload) -> Option<Self> {
        match payload {
            ParsedPayload::TopicDetail(detail) => Some(detail),
            _ => None,
        }
    }
}
