//! Profile handlers: onboarding, dashboard, resume and start-over.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::{FeatureError, SessionContext};
use crate::domain::profile::{available_features, AgeBracket, FeatureDescriptor, Profile, ProfileForm};
use crate::ports::ProfileStore;

/// What the dashboard shows for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub greeting: String,
    pub audience: String,
    pub bracket: AgeBracket,
    pub features: &'static [FeatureDescriptor],
}

/// Handler for profile lifecycle commands.
pub struct ProfileHandler {
    store: Arc<dyn ProfileStore>,
}

impl ProfileHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Validates the form, saves the profile and opens a fresh session.
    ///
    /// Invalid input never reaches the store.
    pub async fn submit(&self, form: &ProfileForm) -> Result<SessionContext, FeatureError> {
        let profile = Profile::from_form(form)?;
        self.store.save(&profile).await?;
        info!(bracket = %profile.bracket(), age = %profile.age(), "Profile submitted");
        Ok(SessionContext::for_profile(profile))
    }

    /// Rebuilds a session from the stored profile; anonymous if none is stored.
    pub async fn resume(&self) -> Result<SessionContext, FeatureError> {
        match self.store.load().await? {
            Some(profile) => {
                info!(bracket = %profile.bracket(), "Resumed stored profile");
                Ok(SessionContext::for_profile(profile))
            }
            None => Ok(SessionContext::anonymous()),
        }
    }

    /// Forgets the stored profile. The returned session has no profile.
    pub async fn start_over(&self) -> Result<SessionContext, FeatureError> {
        self.store.clear().await?;
        info!("Profile cleared");
        Ok(SessionContext::anonymous())
    }

    pub fn dashboard(&self, profile: &Profile) -> Dashboard {
        Dashboard {
            greeting: format!("Hello, {}!", profile.name()),
            audience: format!("Content tailored for {}", profile.bracket()),
            bracket: profile.bracket(),
            features: available_features(profile.bracket()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::profile::InMemoryProfileStore;
    use crate::domain::foundation::ValidationError;
    use crate::domain::profile::Feature;

    fn handler() -> (ProfileHandler, InMemoryProfileStore) {
        let store = InMemoryProfileStore::new();
        (ProfileHandler::new(Arc::new(store.clone())), store)
    }

    mod submit {
        use super::*;

        #[tokio::test]
        async fn valid_form_saves_and_opens_session() {
            let (handler, store) = handler();
            let ctx = handler
                .submit(&ProfileForm::new(" Asha ", "15", "Female"))
                .await
                .unwrap();

            let profile = ctx.profile().unwrap();
            assert_eq!(profile.name(), "Asha");
            assert_eq!(profile.bracket(), AgeBracket::Teens);
            assert_eq!(store.load().await.unwrap().as_ref(), Some(profile));
        }

        #[tokio::test]
        async fn underage_is_rejected_before_saving() {
            let (handler, store) = handler();
            let err = handler
                .submit(&ProfileForm::new("Tiny", "4", ""))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                FeatureError::Validation(ValidationError::below_minimum("age", 5, 4))
            );
            assert!(store.is_empty().await);
        }

        #[tokio::test]
        async fn non_numeric_age_is_invalid_format() {
            let (handler, _) = handler();
            let err = handler
                .submit(&ProfileForm::new("Asha", "fifteen", ""))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                FeatureError::Validation(ValidationError::InvalidFormat { .. })
            ));
        }
    }

    mod lifecycle {
        use super::*;

        #[tokio::test]
        async fn resume_without_profile_is_anonymous() {
            let (handler, _) = handler();
            assert!(handler.resume().await.unwrap().profile().is_none());
        }

        #[tokio::test]
        async fn resume_restores_saved_profile() {
            let (handler, _) = handler();
            handler
                .submit(&ProfileForm::new("Ravi", "30", "Male"))
                .await
                .unwrap();
            let ctx = handler.resume().await.unwrap();
            assert_eq!(ctx.profile().unwrap().bracket(), AgeBracket::Adults);
        }

        #[tokio::test]
        async fn start_over_clears_store() {
            let (handler, store) = handler();
            handler
                .submit(&ProfileForm::new("Ravi", "30", "Male"))
                .await
                .unwrap();

            let ctx = handler.start_over().await.unwrap();
            assert!(store.is_empty().await);
            assert_eq!(
                ctx.require_feature(Feature::Chat).unwrap_err(),
                FeatureError::ProfileRequired
            );
        }
    }

    mod dashboard {
        use super::*;
        use crate::domain::profile::Age;

        #[test]
        fn kids_dashboard() {
            let (handler, _) = handler();
            let profile = Profile::new("Meera", Age::new(8).unwrap(), "Female");
            let dashboard = handler.dashboard(&profile);

            assert_eq!(dashboard.greeting, "Hello, Meera!");
            assert_eq!(dashboard.audience, "Content tailored for Kids");
            let ids: Vec<_> = dashboard.features.iter().map(|f| f.id()).collect();
            assert_eq!(ids, vec!["chatbot", "stories", "learn"]);
        }

        #[test]
        fn young_adult_dashboard_names_bracket() {
            let (handler, _) = handler();
            let profile = Profile::new("Dev", Age::new(20).unwrap(), "");
            let dashboard = handler.dashboard(&profile);
            assert_eq!(dashboard.audience, "Content tailored for Young Adults");
            assert_eq!(dashboard.features.len(), 5);
        }
    }
}
