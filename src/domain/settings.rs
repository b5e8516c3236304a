//! 阅读设置
//!
//! 设置由默认值和用户修改显式合并得到：存储中的记录按 [`ReaderSettingsPatch`]
//! 读取，缺失的字段保留默认值。

use serde::{Deserialize, Serialize};

const SCROLL_AMOUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=2000;
const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 8..=72;
const LINE_HEIGHT_RANGE: std::ops::RangeInclusive<f32> = 1.0..=4.0;

/// 阅读主题
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderTheme {
    #[default]
    Beige,
    Dark,
    /// 护眼绿
    #[serde(rename = "green")]
    EyeProtection,
}

/// 阅读设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderSettings {
    /// 每次翻动的滚动距离（像素）
    pub scroll_amount: u32,
    /// 字号（像素）
    pub font_size: u32,
    /// 行高倍数
    pub line_height: f32,
    pub theme: ReaderTheme,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            scroll_amount: 100,
            font_size: 20,
            line_height: 1.8,
            theme: ReaderTheme::Beige,
        }
    }
}

/// 部分设置，`None` 表示不修改
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettingsPatch {
    pub scroll_amount: Option<u32>,
    pub font_size: Option<u32>,
    pub line_height: Option<f32>,
    pub theme: Option<ReaderTheme>,
}

impl ReaderSettings {
    /// 以当前设置为基础，应用 patch 中给出的字段
    pub fn merge(&self, patch: &ReaderSettingsPatch) -> Self {
        Self {
            scroll_amount: patch.scroll_amount.unwrap_or(self.scroll_amount),
            font_size: patch.font_size.unwrap_or(self.font_size),
            line_height: patch.line_height.unwrap_or(self.line_height),
            theme: patch.theme.unwrap_or(self.theme),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !SCROLL_AMOUNT_RANGE.contains(&self.scroll_amount) {
            return Err("滚动距离必须在 1 到 2000 像素之间");
        }
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err("字号必须在 8 到 72 像素之间");
        }
        if !LINE_HEIGHT_RANGE.contains(&self.line_height) {
            return Err("行高必须在 1.0 到 4.0 之间");
        }
        Ok(())
    }
}

impl From<ReaderSettings> for ReaderSettingsPatch {
    fn from(settings: ReaderSettings) -> Self {
        Self {
            scroll_amount: Some(settings.scroll_amount),
            font_size: Some(settings.font_size),
            line_height: Some(settings.line_height),
            theme: Some(settings.theme),
        }
    }
}
