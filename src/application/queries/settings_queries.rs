//! Settings Queries

/// 获取阅读设置查询
#[derive(Debug, Clone)]
pub struct GetSettings;
