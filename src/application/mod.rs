//! Application layer - Session state and feature handlers.
//!
//! This layer sequences domain operations against the ports. It owns the
//! per-session state and the one-request-per-control guard.

mod context;
mod control;
mod errors;
pub mod handlers;

pub use context::SessionContext;
pub use control::{Control, ControlGuard, ControlPermit};
pub use errors::FeatureError;
pub use handlers::{
    ChatHandler, ChoiceFeedback, Dashboard, DialogueHandler, DialogueOpening, ProfileHandler,
    RoleplayHandler, StoryHandler, TopicHandler,
};
