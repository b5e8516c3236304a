//! In-Memory Settings Store Implementation

use std::sync::RwLock;

use crate::application::ports::{SettingsError, SettingsStorePort};
use crate::domain::ReaderSettings;

/// 内存设置存储（进程退出即丢失）
pub struct InMemorySettingsStore {
    settings: RwLock<ReaderSettings>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(ReaderSettings::default()),
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStorePort for InMemorySettingsStore {
    fn load(&self) -> Result<ReaderSettings, SettingsError> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))
    }

    fn save(&self, settings: &ReaderSettings) -> Result<(), SettingsError> {
        let mut current = self
            .settings
            .write()
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;
        *current = settings.clone();
        Ok(())
    }
}
