//! Request kinds and their sampling profiles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of requests the platform sends to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    FreeformChat,
    ScenarioGenerate,
    ScenarioFeedback,
    DialogueOpen,
    DialogueContinue,
    StoryGenerate,
    TopicListGenerate,
    TopicDetailGenerate,
}

impl RequestKind {
    /// Returns all request kinds.
    pub fn all() -> &'static [RequestKind] {
        &[
            RequestKind::FreeformChat,
            RequestKind::ScenarioGenerate,
            RequestKind::ScenarioFeedback,
            RequestKind::DialogueOpen,
            RequestKind::DialogueContinue,
            RequestKind::StoryGenerate,
            RequestKind::TopicListGenerate,
            RequestKind::TopicDetailGenerate,
        ]
    }

    /// Returns true if the response must be a single JSON object.
    pub fn strict_json(&self) -> bool {
        !matches!(self, RequestKind::FreeformChat)
    }

    /// Sampling parameters for this kind.
    pub fn sampling(&self) -> SamplingProfile {
        if self.strict_json() {
            SamplingProfile::strict()
        } else {
            SamplingProfile::freeform()
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::FreeformChat => "freeform_chat",
            RequestKind::ScenarioGenerate => "scenario_generate",
            RequestKind::ScenarioFeedback => "scenario_feedback",
            RequestKind::DialogueOpen => "dialogue_open",
            RequestKind::DialogueContinue => "dialogue_continue",
            RequestKind::StoryGenerate => "story_generate",
            RequestKind::TopicListGenerate => "topic_list_generate",
            RequestKind::TopicDetailGenerate => "topic_detail_generate",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingProfile {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl SamplingProfile {
    /// Low-variance settings with a large budget, for structured output.
    pub fn strict() -> Self {
        Self {
            temperature: 0.3,
            top_k: 10,
            top_p: 0.9,
            max_output_tokens: 4096,
        }
    }

    /// Higher-variance settings for conversational text.
    pub fn freeform() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}
