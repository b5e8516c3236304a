//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（BookRepository、SettingsStore）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    DeleteBook,
    ImportBook,
    UpdateProgress,
    UpdateSettings,
    // Handlers
    handlers::{
        DeleteBookHandler, ImportBookHandler, ImportBookResponse, UpdateProgressHandler,
        UpdateSettingsHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    BookRepositoryPort, BookSummary, RepositoryError, SettingsError, SettingsStorePort,
};

pub use queries::{
    GetBook,
    GetChapter,
    GetSettings,
    ListBooks,
    // Handlers
    handlers::{GetBookHandler, GetChapterHandler, GetSettingsHandler, ListBooksHandler},
};
