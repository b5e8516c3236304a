//! Book Context - 书籍限界上下文
//!
//! 职责:
//! - 书籍聚合（章节列表 + 阅读进度）
//! - 章节实体
//! - 文件名 / 书名值对象

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::Book;
pub use entities::Chapter;
pub use errors::BookError;
pub use value_objects::{BookTitle, FileName};
