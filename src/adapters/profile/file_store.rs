//! File-based Profile Store Adapter
//!
//! Stores the profile as a single YAML file. Writes go through a temporary
//! file and a rename so a crash never leaves a half-written profile.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::profile::Profile;
use crate::ports::{ProfileStore, ProfileStoreError};

/// YAML file storage for the profile
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    /// Create a store backed by the file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileProfileStore::new("./data/profile.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("yaml.tmp")
    }

    async fn ensure_parent(&self) -> Result<(), ProfileStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ProfileStoreError::IoError(format!("Failed to create directory: {}", e)))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self) -> Result<Option<Profile>, ProfileStoreError> {
        let yaml = match fs::read_to_string(&self.path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProfileStoreError::IoError(e.to_string())),
        };

        let profile: Profile = serde_yaml::from_str(&yaml)
            .map_err(|e| ProfileStoreError::DeserializationFailed(e.to_string()))?;
        debug!(path = %self.path.display(), bracket = %profile.bracket(), "Loaded profile");
        Ok(Some(profile))
    }

    async fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
        self.ensure_parent().await?;

        let yaml = serde_yaml::to_string(profile)
            .map_err(|e| ProfileStoreError::SerializationFailed(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, yaml)
            .await
            .map_err(|e| ProfileStoreError::IoError(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| ProfileStoreError::IoError(format!("Failed to rename file: {}", e)))?;

        debug!(path = %self.path.display(), "Saved profile");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ProfileStoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared profile");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ProfileStoreError::IoError(format!("Failed to delete file: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Age, AgeBracket};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileProfileStore {
        FileProfileStore::new(dir.path().join("nested").join("profile.yaml"))
    }

    fn test_profile() -> Profile {
        Profile::new("Asha", Age::new(14).unwrap(), "Female")
    }

    #[tokio::test]
    async fn empty_store_loads_none() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&test_profile()).await.unwrap();
        assert!(store.path().exists());

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, test_profile());
        assert_eq!(loaded.bracket(), AgeBracket::Teens);
    }

    #[tokio::test]
    async fn save_replaces_previous_profile() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&test_profile()).await.unwrap();
        let adult = Profile::new("Ravi", Age::new(30).unwrap(), "Male");
        store.save(&adult).await.unwrap();

        assert_eq!(store.load().await.unwrap().unwrap().name(), "Ravi");
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&test_profile()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());

        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn stored_bracket_is_rederived() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            "name: Meera\nage: 8\ngender: Female\nbracket: Adults\n",
        )
        .unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.bracket(), AgeBracket::Kids);
    }

    #[tokio::test]
    async fn underage_record_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "name: Tiny\nage: 3\ngender: ''\n").unwrap();

        assert!(matches!(
            store.load().await,
            Err(ProfileStoreError::DeserializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn garbage_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "- not\n- a\n- profile\n").unwrap();

        assert!(matches!(
            store.load().await,
            Err(ProfileStoreError::DeserializationFailed(_))
        ));
    }
}
