//! Reflective stories.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::exchange::exchange;
use crate::application::{Control, FeatureError, SessionContext};
use crate::domain::contract::Story;
use crate::domain::profile::Feature;
use crate::domain::prompt::{PromptBuilder, PromptTask};
use crate::ports::CompletionClient;

/// Handler for the story screen. Nothing is cached; every call asks for a
/// new story.
pub struct StoryHandler {
    client: Arc<dyn CompletionClient>,
    prompts: PromptBuilder,
}

impl StoryHandler {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            prompts: PromptBuilder::new(),
        }
    }

    pub async fn generate(&self, ctx: &SessionContext) -> Result<Story, FeatureError> {
        let profile = ctx.require_feature(Feature::Stories)?;
        let _permit = ctx.controls().acquire(Control::StoryGenerate)?;

        let request = self.prompts.build_for(profile, PromptTask::StoryGenerate);
        let story: Story = exchange(self.client.as_ref(), request).await?;
        info!(title = %story.title, questions = story.questions.len(), "Story generated");
        Ok(story)
    }

    /// "Generate another story".
    pub async fn another(&self, ctx: &SessionContext) -> Result<Story, FeatureError> {
        self.generate(ctx).await
    }
}
