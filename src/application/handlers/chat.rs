//! Free-form chat with the assistant.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::exchange::exchange;
use crate::application::{Control, FeatureError, SessionContext};
use crate::domain::chat::{apology, greeting};
use crate::domain::foundation::ValidationError;
use crate::domain::profile::Feature;
use crate::domain::prompt::{PromptBuilder, PromptTask};
use crate::ports::CompletionClient;

/// Handler for the chat screen.
pub struct ChatHandler {
    client: Arc<dyn CompletionClient>,
    prompts: PromptBuilder,
}

impl ChatHandler {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            prompts: PromptBuilder::new(),
        }
    }

    /// Starts a fresh transcript with the assistant's greeting.
    pub async fn open(&self, ctx: &SessionContext) -> Result<String, FeatureError> {
        let profile = ctx.require_feature(Feature::Chat)?;
        let text = greeting(profile);
        let mut transcript = ctx.transcript().await;
        transcript.clear();
        transcript.push_assistant(text.clone());
        Ok(text)
    }

    /// Sends one message and resolves its placeholder with the reply.
    ///
    /// On failure the placeholder is resolved with an apology carrying the
    /// user-facing cause, and the error is returned as well.
    pub async fn send(&self, ctx: &SessionContext, message: &str) -> Result<String, FeatureError> {
        let profile = ctx.require_feature(Feature::Chat)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }
        let _permit = ctx.controls().acquire(Control::ChatSend)?;

        let pending = {
            let mut transcript = ctx.transcript().await;
            transcript.push_user(message);
            transcript.push_placeholder()
        };

        let request = self
            .prompts
            .build_for(profile, PromptTask::FreeformChat { message });
        let result = exchange::<String>(self.client.as_ref(), request).await;

        let shown = match &result {
            Ok(reply) => reply.clone(),
            Err(err) => apology(profile, &err.user_message()),
        };
        let entry = pending.entry_id();
        if !ctx.transcript().await.resolve(pending, shown) {
            info!(entry = %entry, "Chat placeholder was cleared before its reply arrived");
        }
        result
    }
}
