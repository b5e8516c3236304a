//! Sled-based Settings Store Implementation

use sled::Db;
use std::path::Path;

use crate::application::ports::{SettingsError, SettingsStorePort};
use crate::domain::{ReaderSettings, ReaderSettingsPatch};

const SETTINGS_KEY: &str = "settings:reader";

/// Sled 设置存储配置
#[derive(Debug, Clone)]
pub struct SledSettingsConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledSettingsConfig {
    fn default() -> Self {
        Self {
            db_path: "data/settings.sled".to_string(),
        }
    }
}

/// Sled 设置存储
///
/// 设置以 JSON 形式保存在单个 key 下；读取时按 patch 解析并合并到默认值上，
/// 旧版本记录缺少的字段自动取默认值
pub struct SledSettingsStore {
    db: Db,
}

impl SledSettingsStore {
    pub fn new(config: &SledSettingsConfig) -> Result<Self, SettingsError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledSettingsStore initialized");

        Ok(Self { db })
    }

    /// 打开现有存储
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let config = SledSettingsConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }
}

impl SettingsStorePort for SledSettingsStore {
    fn load(&self) -> Result<ReaderSettings, SettingsError> {
        let stored = self
            .db
            .get(SETTINGS_KEY)
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        let Some(bytes) = stored else {
            return Ok(ReaderSettings::default());
        };

        // 记录损坏时退回默认值，下一次 save 会覆盖它
        match serde_json::from_slice::<ReaderSettingsPatch>(&bytes) {
            Ok(patch) => Ok(ReaderSettings::default().merge(&patch)),
            Err(e) => {
                tracing::warn!(error = %e, "Stored reader settings are unreadable, using defaults");
                Ok(ReaderSettings::default())
            }
        }
    }

    fn save(&self, settings: &ReaderSettings) -> Result<(), SettingsError> {
        let bytes = serde_json::to_vec(settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;

        self.db
            .insert(SETTINGS_KEY, bytes)
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReaderTheme;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults_when_empty() {
        let dir = tempdir().unwrap();
        let store = SledSettingsStore::open(dir.path().join("settings.sled")).unwrap();

        assert_eq!(store.load().unwrap(), ReaderSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = SledSettingsStore::open(dir.path().join("settings.sled")).unwrap();

        let settings = ReaderSettings {
            scroll_amount: 300,
            font_size: 22,
            line_height: 2.0,
            theme: ReaderTheme::EyeProtection,
        };
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_settings_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.sled");

        {
            let store = SledSettingsStore::open(&path).unwrap();
            let settings = ReaderSettings {
                font_size: 30,
                ..ReaderSettings::default()
            };
            store.save(&settings).unwrap();
        }

        let store = SledSettingsStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap().font_size, 30);
    }

    #[test]
    fn test_partial_record_merges_onto_defaults() {
        let dir = tempdir().unwrap();
        let store = SledSettingsStore::open(dir.path().join("settings.sled")).unwrap();

        // 旧版本只保存了 scroll_amount
        store
            .db
            .insert(SETTINGS_KEY, br#"{"scroll_amount": 150}"#.to_vec())
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.scroll_amount, 150);
        assert_eq!(loaded.font_size, ReaderSettings::default().font_size);
        assert_eq!(loaded.theme, ReaderTheme::Beige);
    }

    #[test]
    fn test_corrupt_record_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let store = SledSettingsStore::open(dir.path().join("settings.sled")).unwrap();

        store
            .db
            .insert(SETTINGS_KEY, b"\x00not json{".to_vec())
            .unwrap();
        assert_eq!(store.load().unwrap(), ReaderSettings::default());

        // 保存后记录恢复正常
        let settings = ReaderSettings {
            font_size: 28,
            ..ReaderSettings::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_update_repairs_corrupt_record() {
        use crate::application::{UpdateSettings, UpdateSettingsHandler};
        use crate::domain::ReaderSettingsPatch;
        use std::sync::Arc;

        let dir = tempdir().unwrap();
        let store = Arc::new(SledSettingsStore::open(dir.path().join("settings.sled")).unwrap());
        store
            .db
            .insert(SETTINGS_KEY, br#"{"font_size": "huge"}"#.to_vec())
            .unwrap();

        let handler = UpdateSettingsHandler::new(store.clone());
        let updated = handler
            .handle(UpdateSettings {
                patch: ReaderSettingsPatch {
                    theme: Some(ReaderTheme::Dark),
                    ..ReaderSettingsPatch::default()
                },
            })
            .unwrap();

        assert_eq!(updated.theme, ReaderTheme::Dark);
        assert_eq!(updated.font_size, ReaderSettings::default().font_size);
        assert_eq!(store.load().unwrap(), updated);
    }
}
