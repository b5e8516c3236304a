//! Book Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{DeleteBook, ImportBook, UpdateProgress};
use crate::application::error::ApplicationError;
use crate::application::ports::BookRepositoryPort;
use crate::domain::book::{Book, FileName};

fn parse_file_name(name: String) -> Result<FileName, ApplicationError> {
    Ok(FileName::new(name)?)
}

// ============================================================================
// ImportBook
// ============================================================================

/// 导入响应
///
/// `persisted = false` 表示保存失败，书籍只存在于本次会话中
#[derive(Debug, Clone)]
pub struct ImportBookResponse {
    pub book: Book,
    pub persisted: bool,
}

/// ImportBook Handler - 切分章节并保存
pub struct ImportBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ImportBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: ImportBook) -> Result<ImportBookResponse, ApplicationError> {
        let file_name = parse_file_name(command.file_name)?;
        let text = command.text;

        // 大文本切分放到阻塞线程池，避免占用 runtime
        let book = tokio::task::spawn_blocking(move || Book::from_text(&text, file_name))
            .await
            .map_err(|e| ApplicationError::internal(format!("Segmentation task failed: {}", e)))?;

        let persisted = match self.book_repo.put(&book).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    file_name = %book.file_name(),
                    error = %e,
                    "Failed to persist book, keeping unsaved session"
                );
                false
            }
        };

        tracing::info!(
            file_name = %book.file_name(),
            title = %book.title(),
            chapters = book.chapter_count(),
            persisted = persisted,
            "Book imported"
        );

        Ok(ImportBookResponse { book, persisted })
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let file_name = parse_file_name(command.file_name)?;

        // 检查书籍是否存在
        let book = self
            .book_repo
            .get(&file_name)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", file_name.as_str()))?;

        self.book_repo.delete(&file_name).await?;

        tracing::info!(
            file_name = %file_name,
            title = %book.title(),
            "Book deleted"
        );

        Ok(())
    }
}

// ============================================================================
// UpdateProgress
// ============================================================================

/// UpdateProgress Handler
pub struct UpdateProgressHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl UpdateProgressHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: UpdateProgress) -> Result<(), ApplicationError> {
        let file_name = parse_file_name(command.file_name)?;

        let mut book = self
            .book_repo
            .get(&file_name)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", file_name.as_str()))?;

        // 先在聚合上校验章节范围，再做原子更新
        let now = Utc::now();
        book.record_progress(command.chapter_index, now)?;

        self.book_repo
            .set_progress(&file_name, command.chapter_index, now)
            .await?;

        tracing::debug!(
            file_name = %file_name,
            chapter_index = command.chapter_index,
            "Reading progress updated"
        );

        Ok(())
    }
}
