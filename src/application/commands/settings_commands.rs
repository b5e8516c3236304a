//! Settings Commands

use crate::domain::ReaderSettingsPatch;

/// 更新阅读设置命令
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub patch: ReaderSettingsPatch,
}
