//! Book Query Handlers

use std::cmp::Reverse;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, BookSummary};
use crate::application::queries::{GetBook, GetChapter, ListBooks};
use crate::domain::book::{Book, Chapter, FileName};

async fn load_book(
    book_repo: &dyn BookRepositoryPort,
    file_name: String,
) -> Result<Book, ApplicationError> {
    let file_name = FileName::new(file_name)?;
    book_repo
        .get(&file_name)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Book", file_name.as_str()))
}

// ============================================================================
// Handlers
// ============================================================================

/// GetBook Handler
pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, query: GetBook) -> Result<Book, ApplicationError> {
        load_book(self.book_repo.as_ref(), query.file_name).await
    }
}

/// ListBooks Handler
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    /// 最近读过的在前；从未读过的排在最后，按导入时间倒序
    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookSummary>, ApplicationError> {
        let mut books = self.book_repo.list_all().await?;
        books.sort_by_key(|b| (Reverse(b.last_read_time), Reverse(b.parsed_at)));
        Ok(books)
    }
}

/// GetChapter Handler
pub struct GetChapterHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetChapterHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<Chapter, ApplicationError> {
        let book = load_book(self.book_repo.as_ref(), query.file_name).await?;

        book.chapter_at(query.position).cloned().ok_or_else(|| {
            ApplicationError::not_found(
                "Chapter",
                format!("{}#{}", book.file_name(), query.position),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryBookRepository;
    use chrono::{Duration, Utc};

    async fn seeded_repo() -> Arc<InMemoryBookRepository> {
        let repo = Arc::new(InMemoryBookRepository::new());
        for name in ["a.txt", "b.txt", "c.txt"] {
            let book = Book::from_text("第一章 开始\n你好\n第二章 结束\n世界", FileName::new(name).unwrap());
            repo.put(&book).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_list_books_sorted_by_last_read_time() {
        let repo = seeded_repo().await;
        let now = Utc::now();
        repo.set_progress(&FileName::new("a.txt").unwrap(), 0, now - Duration::hours(1))
            .await
            .unwrap();
        repo.set_progress(&FileName::new("c.txt").unwrap(), 1, now)
            .await
            .unwrap();

        let books = ListBooksHandler::new(repo).handle(ListBooks).await.unwrap();
        let names: Vec<&str> = books.iter().map(|b| b.file_name.as_str()).collect();

        assert_eq!(names, vec!["c.txt", "a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_get_chapter() {
        let repo = seeded_repo().await;
        let handler = GetChapterHandler::new(repo);

        let chapter = handler
            .handle(GetChapter {
                file_name: "b.txt".to_string(),
                position: 1,
            })
            .await
            .unwrap();
        assert_eq!(chapter.title(), "第二章 结束");
        assert_eq!(chapter.content(), "世界");

        let err = handler
            .handle(GetChapter {
                file_name: "b.txt".to_string(),
                position: 2,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { resource_type: "Chapter", .. }));
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let handler = GetBookHandler::new(Arc::new(InMemoryBookRepository::new()));

        let err = handler
            .handle(GetBook {
                file_name: "missing.txt".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { resource_type: "Book", .. }));
    }
}
