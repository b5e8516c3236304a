//! Book Commands

/// 导入书籍命令（切分章节并保存，同名覆盖）
#[derive(Debug, Clone)]
pub struct ImportBook {
    pub file_name: String,
    pub text: String,
}

/// 删除书籍命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub file_name: String,
}

/// 更新阅读进度命令
#[derive(Debug, Clone)]
pub struct UpdateProgress {
    pub file_name: String,
    /// 章节在列表中的位置（包含序章）
    pub chapter_index: usize,
}
