//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    DeleteBookHandler, ImportBookHandler, UpdateProgressHandler, UpdateSettingsHandler,
    // Query handlers
    GetBookHandler, GetChapterHandler, GetSettingsHandler, ListBooksHandler,
    // Ports
    BookRepositoryPort, SettingsStorePort,
};

/// 默认上传大小上限 (10MB)
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// 应用状态
pub struct AppState {
    /// 单个 TXT 上传的字节上限
    pub max_upload_size: u64,

    // ========== Command Handlers ==========
    pub import_book_handler: ImportBookHandler,
    pub delete_book_handler: DeleteBookHandler,
    pub update_progress_handler: UpdateProgressHandler,
    pub update_settings_handler: UpdateSettingsHandler,

    // ========== Query Handlers ==========
    pub get_book_handler: GetBookHandler,
    pub list_books_handler: ListBooksHandler,
    pub get_chapter_handler: GetChapterHandler,
    pub get_settings_handler: GetSettingsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        settings_store: Arc<dyn SettingsStorePort>,
        max_upload_size: u64,
    ) -> Self {
        Self {
            max_upload_size,

            // Command handlers
            import_book_handler: ImportBookHandler::new(book_repo.clone()),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone()),
            update_progress_handler: UpdateProgressHandler::new(book_repo.clone()),
            update_settings_handler: UpdateSettingsHandler::new(settings_store.clone()),

            // Query handlers
            get_book_handler: GetBookHandler::new(book_repo.clone()),
            list_books_handler: ListBooksHandler::new(book_repo.clone()),
            get_chapter_handler: GetChapterHandler::new(book_repo),
            get_settings_handler: GetSettingsHandler::new(settings_store),
        }
    }
}
