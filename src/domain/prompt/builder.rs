//! Assembles complete completion requests.

use tracing::debug;

use super::{persona, PromptTask};
use crate::domain::profile::{Age, AgeBracket, Profile};
use crate::ports::CompletionRequest;

/// Builds a fresh [`CompletionRequest`] per call.
///
/// The system context is the persona preamble plus exactly one bracket
/// block, plus the JSON instruction for strict kinds. Sampling follows the
/// request kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, bracket: AgeBracket, age: Age, task: PromptTask<'_>) -> CompletionRequest {
        let kind = task.kind();
        let system_context = persona::system_context(bracket, age, kind.strict_json());
        let user_content = task.render(bracket, age);
        let request = CompletionRequest::new(kind, system_context, user_content);
        debug!(
            request_id = %request.id,
            kind = %kind,
            bracket = %bracket,
            strict_json = request.strict_json,
            "Built completion request"
        );
        request
    }

    /// Convenience wrapper taking bracket and age from a profile.
    pub fn build_for(&self, profile: &Profile, task: PromptTask<'_>) -> CompletionRequest {
        self.build(profile.bracket(), profile.age(), task)
    }
}
