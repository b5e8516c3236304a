//! Book Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("无效的文件名: {0}")]
    InvalidFileName(&'static str),

    #[error("章节位置越界: {position}（共 {total} 章）")]
    ChapterOutOfRange { position: usize, total: usize },
}
