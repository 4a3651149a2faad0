//! Topic library: a generated list of topics and per-topic detail pages.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::exchange::exchange;
use crate::application::{Control, FeatureError, SessionContext};
use crate::domain::contract::{TopicDetail, TopicList};
use crate::domain::foundation::ValidationError;
use crate::domain::profile::Feature;
use crate::domain::prompt::{PromptBuilder, PromptTask};
use crate::ports::CompletionClient;

/// Handler for the topic library screen.
pub struct TopicHandler {
    client: Arc<dyn CompletionClient>,
    prompts: PromptBuilder,
}

impl TopicHandler {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            prompts: PromptBuilder::new(),
        }
    }

    pub async fn list(&self, ctx: &SessionContext) -> Result<TopicList, FeatureError> {
        let profile = ctx.require_feature(Feature::Topics)?;
        let _permit = ctx.controls().acquire(Control::TopicList)?;

        let request = self.prompts.build_for(profile, PromptTask::TopicListGenerate);
        let list: TopicList = exchange(self.client.as_ref(), request).await?;
        info!(topics = list.topics.len(), "Topic list generated");
        Ok(list)
    }

    /// Content for one topic. `content` is an HTML fragment.
    pub async fn detail(
        &self,
        ctx: &SessionContext,
        topic_title: &str,
    ) -> Result<TopicDetail, FeatureError> {
        let profile = ctx.require_feature(Feature::Topics)?;
        let topic_title = topic_title.trim();
        if topic_title.is_empty() {
            return Err(ValidationError::empty_field("topic").into());
        }
        let _permit = ctx.controls().acquire(Control::TopicDetail)?;

        let request = self
            .prompts
            .build_for(profile, PromptTask::TopicDetailGenerate { topic_title });
        let detail: TopicDetail = exchange(self.client.as_ref(), request).await?;
        info!(topic = %topic_title, "Topic detail generated");
        Ok(detail)
    }
}
