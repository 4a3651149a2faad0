//! In-Memory Profile Store Adapter
//!
//! Keeps the profile in memory. Useful for testing and for runs that should
//! not touch the disk.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::profile::Profile;
use crate::ports::{ProfileStore, ProfileStoreError};

/// In-memory storage for the profile. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    slot: Arc<RwLock<Option<Profile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `profile`
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(profile))),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(&self) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
        *self.slot.write().await = Some(profile.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ProfileStoreError> {
        self.slot.write().await.take();
        Ok(())
    }
}
