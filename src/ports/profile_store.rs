//! Profile Store Port - Interface for persisting the single local profile.
//!
//! The store holds at most one profile. Loading an empty store is not an
//! error; it yields `None`.

use async_trait::async_trait;

use crate::domain::profile::Profile;

/// Errors that can occur during profile storage operations
#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("Failed to serialize profile: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize profile: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading, saving and clearing the stored profile
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the stored profile, if any.
    ///
    /// # Errors
    /// Returns `ProfileStoreError::DeserializationFailed` if a stored record
    /// exists but does not describe a valid profile.
    async fn load(&self) -> Result<Option<Profile>, ProfileStoreError>;

    /// Save the profile, replacing any previous one.
    async fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError>;

    /// Remove the stored profile. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), ProfileStoreError>;
}
