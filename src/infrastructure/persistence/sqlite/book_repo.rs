//! SQLite Book Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{BookRepositoryPort, BookSummary, RepositoryError};
use crate::domain::book::{Book, BookTitle, Chapter, FileName};

/// 每条批量 INSERT 的章节数
const CHAPTER_BATCH_SIZE: usize = 500;

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn parse_optional_time(value: Option<String>) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    value.as_deref().map(parse_time).transpose()
}

fn parse_file_name(value: String) -> Result<FileName, RepositoryError> {
    FileName::new(value).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

#[derive(FromRow)]
struct BookRow {
    file_name: String,
    title: String,
    parsed_at: String,
    last_read_chapter_index: Option<i64>,
    last_read_time: Option<String>,
}

#[derive(FromRow)]
struct BookSummaryRow {
    file_name: String,
    title: String,
    parsed_at: String,
    last_read_chapter_index: Option<i64>,
    last_read_time: Option<String>,
    chapter_count: i64,
    total_word_count: i64,
}

impl TryFrom<BookSummaryRow> for BookSummary {
    type Error = RepositoryError;

    fn try_from(row: BookSummaryRow) -> Result<Self, Self::Error> {
        Ok(BookSummary {
            file_name: row.file_name,
            title: row.title,
            chapter_count: row.chapter_count as usize,
            total_word_count: row.total_word_count as usize,
            parsed_at: parse_time(&row.parsed_at)?,
            last_read_chapter_index: row.last_read_chapter_index.map(|i| i as usize),
            last_read_time: parse_optional_time(row.last_read_time)?,
        })
    }
}

#[derive(FromRow)]
struct ChapterRow {
    chapter_index: i64,
    title: String,
    content: String,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter::new(row.chapter_index as i32, row.title, row.content)
    }
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn put(&self, book: &Book) -> Result<(), RepositoryError> {
        // 书籍和章节在同一事务中整体替换
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO books (file_name, title, parsed_at, last_read_chapter_index, last_read_time)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(file_name) DO UPDATE SET
                title = excluded.title,
                parsed_at = excluded.parsed_at,
                last_read_chapter_index = excluded.last_read_chapter_index,
                last_read_time = excluded.last_read_time
            "#,
        )
        .bind(book.file_name().as_str())
        .bind(book.title().as_str())
        .bind(book.parsed_at().to_rfc3339())
        .bind(book.last_read_chapter_index().map(|i| i as i64))
        .bind(book.last_read_time().map(|t| t.to_rfc3339()))
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query("DELETE FROM chapters WHERE file_name = ?")
            .bind(book.file_name().as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        let chapters: Vec<(usize, &Chapter)> = book.chapters().iter().enumerate().collect();
        for chunk in chapters.chunks(CHAPTER_BATCH_SIZE) {
            let mut query = String::from(
                "INSERT INTO chapters (file_name, position, chapter_index, title, content, word_count) VALUES ",
            );
            let placeholders: Vec<&str> = chunk.iter().map(|_| "(?, ?, ?, ?, ?, ?)").collect();
            query.push_str(&placeholders.join(", "));

            let mut sql_query = sqlx::query(&query);
            for (position, chapter) in chunk {
                sql_query = sql_query
                    .bind(book.file_name().as_str())
                    .bind(*position as i64)
                    .bind(chapter.index() as i64)
                    .bind(chapter.title())
                    .bind(chapter.content())
                    .bind(chapter.word_count() as i64);
            }

            sql_query.execute(&mut *tx).await.map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        tracing::debug!(
            file_name = %book.file_name(),
            chapters = book.chapter_count(),
            "Book saved"
        );

        Ok(())
    }

    async fn get(&self, file_name: &FileName) -> Result<Option<Book>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(
            "SELECT file_name, title, parsed_at, last_read_chapter_index, last_read_time FROM books WHERE file_name = ?",
        )
        .bind(file_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let chapters: Vec<ChapterRow> = sqlx::query_as(
            "SELECT chapter_index, title, content FROM chapters WHERE file_name = ? ORDER BY position",
        )
        .bind(file_name.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        if chapters.is_empty() {
            return Err(RepositoryError::InvalidData(format!(
                "Book {} has no chapters",
                file_name
            )));
        }

        Ok(Some(Book::restore(
            parse_file_name(row.file_name)?,
            BookTitle::from(row.title),
            chapters.into_iter().map(Chapter::from).collect(),
            parse_time(&row.parsed_at)?,
            row.last_read_chapter_index.map(|i| i as usize),
            parse_optional_time(row.last_read_time)?,
        )))
    }

    async fn list_all(&self) -> Result<Vec<BookSummary>, RepositoryError> {
        let rows: Vec<BookSummaryRow> = sqlx::query_as(
            r#"
            SELECT b.file_name, b.title, b.parsed_at, b.last_read_chapter_index, b.last_read_time,
                   COUNT(c.position) AS chapter_count,
                   COALESCE(SUM(c.word_count), 0) AS total_word_count
            FROM books b
            LEFT JOIN chapters c ON c.file_name = b.file_name
            GROUP BY b.file_name
            ORDER BY b.parsed_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(BookSummary::try_from).collect()
    }

    async fn delete(&self, file_name: &FileName) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("DELETE FROM chapters WHERE file_name = ?")
            .bind(file_name.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        sqlx::query("DELETE FROM books WHERE file_name = ?")
            .bind(file_name.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        Ok(())
    }

    async fn set_progress(
        &self,
        file_name: &FileName,
        chapter_index: usize,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        // 章节数在同一条语句中校验，避免与并发的重新导入交错
        let result = sqlx::query(
            r#"
            UPDATE books
            SET last_read_chapter_index = ?, last_read_time = ?
            WHERE file_name = ?
              AND ? < (SELECT COUNT(*) FROM chapters WHERE chapters.file_name = books.file_name)
            "#,
        )
        .bind(chapter_index as i64)
        .bind(at.to_rfc3339())
        .bind(file_name.as_str())
        .bind(chapter_index as i64)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM books WHERE file_name = ?")
            .bind(file_name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        match exists {
            Some(_) => Err(RepositoryError::ChapterOutOfRange {
                file_name: file_name.to_string(),
                position: chapter_index,
            }),
            None => Err(RepositoryError::NotFound(file_name.to_string())),
        }
    }
}
