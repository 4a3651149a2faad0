//! Completion Client Adapters.
//!
//! Implementations of the CompletionClient port.
//!
//! ## Available Adapters
//!
//! - `GeminiClient` - Google Gemini `generateContent` API
//! - `MockCompletionClient` - Configurable mock for testing and offline runs

mod gemini_client;
mod mock_client;

pub use gemini_client::{
    classify_error, extract_text, GeminiClient, GeminiConfig, GenerateContentResponse,
    DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use mock_client::{MockCompletionClient, DEFAULT_REPLY};
