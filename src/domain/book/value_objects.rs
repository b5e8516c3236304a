//! Book Context - Value Objects

use serde::{Deserialize, Serialize};

use super::BookError;

const TXT_SUFFIX: &str = ".txt";
const MAX_FILE_NAME_BYTES: usize = 255;

/// 文件名 - 书籍在存储中的唯一键
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileName(String);

impl FileName {
    pub fn new(name: impl Into<String>) -> Result<Self, BookError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BookError::InvalidFileName("文件名不能为空"));
        }
        if name.len() > MAX_FILE_NAME_BYTES {
            return Err(BookError::InvalidFileName("文件名长度不能超过255字节"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 书名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTitle(String);

impl BookTitle {
    /// 由文件名推导书名：只去掉末尾的一个 `.txt`
    pub fn from_file_name(file_name: &FileName) -> Self {
        let name = file_name.as_str();
        Self(name.strip_suffix(TXT_SUFFIX).unwrap_or(name).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BookTitle {
    fn from(title: String) -> Self {
        Self(title)
    }
}

impl std::fmt::Display for BookTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
