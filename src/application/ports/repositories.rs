//! Repository Ports - 出站端口
//!
//! 定义书籍持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite / 内存）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::book::{Book, FileName};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 章节位置超出已保存书籍的章节数
    #[error("Chapter {position} out of range for {file_name}")]
    ChapterOutOfRange { file_name: String, position: usize },
}

/// 书架列表使用的书籍摘要（不含章节正文）
#[derive(Debug, Clone, PartialEq)]
pub struct BookSummary {
    pub file_name: String,
    pub title: String,
    pub chapter_count: usize,
    pub total_word_count: usize,
    pub parsed_at: DateTime<Utc>,
    pub last_read_chapter_index: Option<usize>,
    pub last_read_time: Option<DateTime<Utc>>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            file_name: book.file_name().as_str().to_string(),
            title: book.title().as_str().to_string(),
            chapter_count: book.chapter_count(),
            total_word_count: book.total_word_count(),
            parsed_at: book.parsed_at(),
            last_read_chapter_index: book.last_read_chapter_index(),
            last_read_time: book.last_read_time(),
        }
    }
}

/// Book Repository Port
///
/// 以文件名为唯一键；同一键上的写操作必须串行化（后写者胜出）
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存书籍（同名覆盖，包括章节和阅读进度）
    async fn put(&self, book: &Book) -> Result<(), RepositoryError>;

    /// 根据文件名查找书籍
    async fn get(&self, file_name: &FileName) -> Result<Option<Book>, RepositoryError>;

    /// 获取所有书籍摘要
    async fn list_all(&self) -> Result<Vec<BookSummary>, RepositoryError>;

    /// 删除书籍（不存在时不报错）
    async fn delete(&self, file_name: &FileName) -> Result<(), RepositoryError>;

    /// 更新阅读进度（原子的读取-修改-保存）
    async fn set_progress(
        &self,
        file_name: &FileName,
        chapter_index: usize,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}
