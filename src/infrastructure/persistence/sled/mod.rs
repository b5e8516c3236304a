//! Sled Persistence - 阅读设置存储

mod settings_store;

pub use settings_store::{SledSettingsStore, SledSettingsConfig};
