//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion clients (Gemini, mock)
//! - `profile` - Profile stores (YAML file, in-memory)

pub mod ai;
pub mod profile;

pub use ai::{GeminiClient, GeminiConfig, MockCompletionClient};
pub use profile::{FileProfileStore, InMemoryProfileStore};
