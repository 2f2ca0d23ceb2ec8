//! Settings persistence

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::json_store::{JsonFile, StoreResult};
use crate::state::Settings;

/// Where user settings live between runs
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the saved settings, falling back to defaults when none exist
    async fn load(&self) -> StoreResult<Settings>;

    async fn save(&self, settings: &Settings) -> StoreResult<()>;
}

/// Settings kept in `settings.json` under the data directory
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    file: JsonFile<Settings>,
}

impl FileSettingsStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(data_dir.join("settings.json")),
        }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> StoreResult<Settings> {
        match self.file.load().await? {
            Some(settings) => Ok(settings),
            None => {
                info!(
                    "No settings at {}, using defaults",
                    self.file.path().display()
                );
                Ok(Settings::default())
            }
        }
    }

    async fn save(&self, settings: &Settings) -> StoreResult<()> {
        self.file.save(settings).await
    }
}
