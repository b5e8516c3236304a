//! Book Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookError, BookTitle, Chapter, FileName};
use crate::domain::chapter_segmenter::segment_chapters;

/// Book 聚合根
///
/// 不变量:
/// - 章节列表非空，顺序即原文出现顺序，创建后不再修改
/// - `parsed_at` 只在创建时设置
/// - 阅读进度只能通过 [`Book::record_progress`] 修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    file_name: FileName,
    title: BookTitle,
    chapters: Vec<Chapter>,
    parsed_at: DateTime<Utc>,
    last_read_chapter_index: Option<usize>,
    last_read_time: Option<DateTime<Utc>>,
}

impl Book {
    /// 从原始文本创建书籍并切分章节
    pub fn from_text(text: &str, file_name: FileName) -> Self {
        let title = BookTitle::from_file_name(&file_name);
        Self {
            file_name,
            title,
            chapters: segment_chapters(text),
            parsed_at: Utc::now(),
            last_read_chapter_index: None,
            last_read_time: None,
        }
    }

    /// 从存储中恢复
    pub fn restore(
        file_name: FileName,
        title: BookTitle,
        chapters: Vec<Chapter>,
        parsed_at: DateTime<Utc>,
        last_read_chapter_index: Option<usize>,
        last_read_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            file_name,
            title,
            chapters,
            parsed_at,
            last_read_chapter_index,
            last_read_time,
        }
    }

    /// 记录阅读进度
    ///
    /// `position` 为章节在列表中的位置（包含序章）
    pub fn record_progress(&mut self, position: usize, at: DateTime<Utc>) -> Result<(), BookError> {
        if position >= self.chapters.len() {
            return Err(BookError::ChapterOutOfRange {
                position,
                total: self.chapters.len(),
            });
        }
        self.last_read_chapter_index = Some(position);
        self.last_read_time = Some(at);
        Ok(())
    }

    // Getters
    pub fn file_name(&self) -> &FileName {
        &self.file_name
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn chapter_at(&self, position: usize) -> Option<&Chapter> {
        self.chapters.get(position)
    }

    pub fn total_word_count(&self) -> usize {
        self.chapters.iter().map(Chapter::word_count).sum()
    }

    pub fn parsed_at(&self) -> DateTime<Utc> {
        self.parsed_at
    }

    pub fn last_read_chapter_index(&self) -> Option<usize> {
        self.last_read_chapter_index
    }

    pub fn last_read_time(&self) -> Option<DateTime<Utc>> {
        self.last_read_time
    }
}
