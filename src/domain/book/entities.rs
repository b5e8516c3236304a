//! Book Context - Entities

use serde::{Deserialize, Serialize};

use crate::domain::chapter_segmenter::PREAMBLE_INDEX;

/// 章节
///
/// 不变量:
/// - `word_count` 始终等于 `content` 的字符数（中文无空格分词，以字符数代替字数）
/// - 序章的 `index` 为 [`PREAMBLE_INDEX`]，其余章节从 0 开始按出现顺序编号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 章节序号
    index: i32,
    /// 章节标题（整行标题文本）
    title: String,
    /// 正文
    content: String,
    /// 字数
    word_count: usize,
}

impl Chapter {
    pub fn new(index: i32, title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let word_count = content.chars().count();
        Self {
            index,
            title: title.into(),
            content,
            word_count,
        }
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_preamble(&self) -> bool {
        self.index == PREAMBLE_INDEX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_follows_content() {
        let chapter = Chapter::new(0, "第一章", "斗之力，三段！");
        assert_eq!(chapter.word_count(), 7);
        assert!(!chapter.is_preamble());
    }

    #[test]
    fn test_preamble_flag() {
        let chapter = Chapter::new(PREAMBLE_INDEX, "序章 / 简介", "");
        assert!(chapter.is_preamble());
        assert_eq!(chapter.word_count(), 0);
    }
}
