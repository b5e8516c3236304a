//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::BookSummary;
use crate::domain::book::{Book, Chapter};
use crate::domain::{ReaderSettings, ReaderTheme};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize, Deserialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Book DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ImportBookRequest {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct FileNameRequest {
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct GetChapterRequest {
    pub file_name: String,
    pub position: usize,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub file_name: String,
    pub chapter_index: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterResponse {
    pub index: i32,
    pub title: String,
    pub content: String,
    pub word_count: usize,
}

impl From<&Chapter> for ChapterResponse {
    fn from(chapter: &Chapter) -> Self {
        Self {
            index: chapter.index(),
            title: chapter.title().to_string(),
            content: chapter.content().to_string(),
            word_count: chapter.word_count(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub file_name: String,
    pub title: String,
    pub parsed_at: String,
    pub last_read_chapter_index: Option<usize>,
    pub last_read_time: Option<String>,
    pub chapters: Vec<ChapterResponse>,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            file_name: book.file_name().to_string(),
            title: book.title().to_string(),
            parsed_at: book.parsed_at().to_rfc3339(),
            last_read_chapter_index: book.last_read_chapter_index(),
            last_read_time: book.last_read_time().map(|t| t.to_rfc3339()),
            chapters: book.chapters().iter().map(ChapterResponse::from).collect(),
        }
    }
}

/// 导入响应 - `persisted = false` 表示保存失败，仅本次会话可读
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportBookResponse {
    pub persisted: bool,
    pub book: BookResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookSummaryResponse {
    pub file_name: String,
    pub title: String,
    pub chapter_count: usize,
    pub total_word_count: usize,
    pub parsed_at: String,
    pub last_read_chapter_index: Option<usize>,
    pub last_read_time: Option<String>,
}

impl From<BookSummary> for BookSummaryResponse {
    fn from(summary: BookSummary) -> Self {
        Self {
            file_name: summary.file_name,
            title: summary.title,
            chapter_count: summary.chapter_count,
            total_word_count: summary.total_word_count,
            parsed_at: summary.parsed_at.to_rfc3339(),
            last_read_chapter_index: summary.last_read_chapter_index,
            last_read_time: summary.last_read_time.map(|t| t.to_rfc3339()),
        }
    }
}

// ============================================================================
// Settings DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub scroll_amount: u32,
    pub font_size: u32,
    pub line_height: f32,
    pub theme: ReaderTheme,
}

impl From<ReaderSettings> for SettingsResponse {
    fn from(settings: ReaderSettings) -> Self {
        Self {
            scroll_amount: settings.scroll_amount,
            font_size: settings.font_size,
            line_height: settings.line_height,
            theme: settings.theme,
        }
    }
}
