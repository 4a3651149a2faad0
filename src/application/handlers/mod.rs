//! Feature handlers.
//!
//! Each handler is a thin sequencer: check the profile and feature gate,
//! take the control permit, build the prompt, send it, and hold the reply to
//! its contract. Failures are handed back to the caller; nothing is retried
//! automatically.

mod chat;
mod dialogue;
mod exchange;
mod profile;
mod roleplay;
mod story;
mod topics;

pub use chat::ChatHandler;
pub use dialogue::{DialogueHandler, DialogueOpening};
pub use profile::{Dashboard, ProfileHandler};
pub use roleplay::{ChoiceFeedback, RoleplayHandler};
pub use story::StoryHandler;
pub use topics::TopicHandler;
