//! Domain Layer - 领域层
//!
//! - Book Context: 书籍与章节
//! - Settings: 阅读设置
//! - 章节分割器

pub mod book;
pub mod settings;

mod chapter_segmenter;

pub use chapter_segmenter::{segment_chapters, FALLBACK_TITLE, PREAMBLE_INDEX, PREAMBLE_TITLE};
pub use settings::{ReaderSettings, ReaderSettingsPatch, ReaderTheme};
