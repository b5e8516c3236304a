//! zenreader - 本地 TXT 小说阅读服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book: 书籍聚合、章节实体、文件名与书名值对象
//! - Chapter Segmenter: 按章节标题行切分全文
//! - Settings: 阅读设置及其合并/校验
//!
//! 应用层 (application/):
//! - Ports: BookRepository, SettingsStore
//! - Commands: 导入、删除、更新进度、更新设置
//! - Queries: 书籍、章节、书架、设置
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 内存仓储（测试及降级运行）
//! - Persistence: SQLite（书籍）+ Sled（设置）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
pub use domain::segment_chapters;
