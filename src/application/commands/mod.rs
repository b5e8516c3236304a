//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod book_commands;
mod settings_commands;

pub mod handlers;

pub use book_commands::*;
pub use settings_commands::*;
