//! Per-control request guard.
//!
//! Each user-facing control may have at most one request in flight. A
//! handler takes a [`ControlPermit`] before sending; a second attempt on the
//! same control fails with `FeatureError::Busy` until the permit drops. The
//! permit releases on drop, so success, failure and early return all
//! re-enable the control.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::FeatureError;

/// A control that triggers a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    ChatSend,
    ScenarioGenerate,
    ScenarioChoice,
    DialogueOpen,
    DialogueSend,
    StoryGenerate,
    TopicList,
    TopicDetail,
}

impl Control {
    const COUNT: usize = 8;

    pub fn all() -> &'static [Control] {
        &[
            Control::ChatSend,
            Control::ScenarioGenerate,
            Control::ScenarioChoice,
            Control::DialogueOpen,
            Control::DialogueSend,
            Control::StoryGenerate,
            Control::TopicList,
            Control::TopicDetail,
        ]
    }

    fn slot(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::ChatSend => "chat_send",
            Control::ScenarioGenerate => "scenario_generate",
            Control::ScenarioChoice => "scenario_choice",
            Control::DialogueOpen => "dialogue_open",
            Control::DialogueSend => "dialogue_send",
            Control::StoryGenerate => "story_generate",
            Control::TopicList => "topic_list",
            Control::TopicDetail => "topic_detail",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One busy flag per [`Control`].
#[derive(Debug, Default)]
pub struct ControlGuard {
    busy: [AtomicBool; Control::COUNT],
}

impl ControlGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `control` busy, or fails if it already is.
    pub fn acquire(&self, control: Control) -> Result<ControlPermit<'_>, FeatureError> {
        let flag = &self.busy[control.slot()];
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(control = %control, "Rejected request while control is busy");
            return Err(FeatureError::Busy { control });
        }
        Ok(ControlPermit { flag, control })
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.busy[control.slot()].load(Ordering::Acquire)
    }
}

/// Proof that a control is held. Releases the control when dropped.
#[derive(Debug)]
#[must_use = "the control is released as soon as the permit is dropped"]
pub struct ControlPermit<'a> {
    flag: &'a AtomicBool,
    control: Control,
}

impl ControlPermit<'_> {
    pub fn control(&self) -> Control {
        self.control
    }
}

impl Drop for ControlPermit<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
