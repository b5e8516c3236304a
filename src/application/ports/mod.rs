//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod repositories;
mod settings_store;

pub use repositories::{BookRepositoryPort, BookSummary, RepositoryError};
pub use settings_store::{SettingsError, SettingsStorePort};
