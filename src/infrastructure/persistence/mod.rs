//! Persistence Layer - 数据持久化
//!
//! SQLite（书籍与章节）和 Sled（阅读设置）存储实现

pub mod sled;
pub mod sqlite;

pub use self::sled::SledSettingsStore;
pub use self::sqlite::SqliteBookRepository;
