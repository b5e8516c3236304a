//! Memory Layer - 内存实现
//!
//! 书籍仓储和设置存储的内存实现，用于测试以及持久化不可用时的降级运行

mod book_repository;
mod settings_store;

pub use book_repository::InMemoryBookRepository;
pub use settings_store::InMemorySettingsStore;
