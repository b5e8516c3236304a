//! Book Queries

/// 获取书籍详情查询（含全部章节）
#[derive(Debug, Clone)]
pub struct GetBook {
    pub file_name: String,
}

/// 列出书架查询（按最近阅读时间倒序）
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 获取单个章节查询
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub file_name: String,
    /// 章节在列表中的位置（包含序章）
    pub position: usize,
}
