//! In-Memory Book Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::application::ports::{BookRepositoryPort, BookSummary, RepositoryError};
use crate::domain::book::{Book, FileName};

/// 内存书籍仓储
///
/// 同一文件名上的写操作由 DashMap 的分片锁串行化
pub struct InMemoryBookRepository {
    books: DashMap<FileName, Book>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
        }
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryPort for InMemoryBookRepository {
    async fn put(&self, book: &Book) -> Result<(), RepositoryError> {
        self.books.insert(book.file_name().clone(), book.clone());
        tracing::debug!(file_name = %book.file_name(), "Book stored in memory");
        Ok(())
    }

    async fn get(&self, file_name: &FileName) -> Result<Option<Book>, RepositoryError> {
        Ok(self.books.get(file_name).map(|b| b.clone()))
    }

    async fn list_all(&self) -> Result<Vec<BookSummary>, RepositoryError> {
        Ok(self
            .books
            .iter()
            .map(|entry| BookSummary::from(entry.value()))
            .collect())
    }

    async fn delete(&self, file_name: &FileName) -> Result<(), RepositoryError> {
        self.books.remove(file_name);
        Ok(())
    }

    async fn set_progress(
        &self,
        file_name: &FileName,
        chapter_index: usize,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut book = self
            .books
            .get_mut(file_name)
            .ok_or_else(|| RepositoryError::NotFound(file_name.to_string()))?;

        book.record_progress(chapter_index, at)
            .map_err(|_| RepositoryError::ChapterOutOfRange {
                file_name: file_name.to_string(),
                position: chapter_index,
            })
    }
}
