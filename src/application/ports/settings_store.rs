//! Settings Store Port - 阅读设置存储
//!
//! 具体实现在 infrastructure 层（Sled / 内存）

use thiserror::Error;

use crate::domain::ReaderSettings;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Settings Store Port
pub trait SettingsStorePort: Send + Sync {
    /// 读取设置，未保存过时返回默认值
    fn load(&self) -> Result<ReaderSettings, SettingsError>;

    /// 保存完整设置
    fn save(&self, settings: &ReaderSettings) -> Result<(), SettingsError>;
}
