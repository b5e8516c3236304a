//! zenreader - 本地 TXT 小说阅读服务
//!
//! - Domain: book/, settings, chapter segmenter
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, persistence

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use zenreader::application::{BookRepositoryPort, SettingsStorePort};
use zenreader::config::{load_config, print_config, AppConfig};
use zenreader::infrastructure::http::{AppState, HttpServer, ServerConfig};
use zenreader::infrastructure::memory::{InMemoryBookRepository, InMemorySettingsStore};
use zenreader::infrastructure::persistence::sled::SledSettingsStore;
use zenreader::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteBookRepository,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},zenreader={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 打开 SQLite 书籍仓储，失败时退回内存实现（书籍仅在本次运行内可读）
async fn open_book_repository(config: &AppConfig) -> Arc<dyn BookRepositoryPort> {
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };

    let opened = async {
        let pool = create_pool(&db_config).await?;
        run_migrations(&pool).await?;
        Ok::<_, sqlx::Error>(pool)
    }
    .await;

    match opened {
        Ok(pool) => Arc::new(SqliteBookRepository::new(pool)),
        Err(e) => {
            tracing::error!(
                database = %config.database.path,
                error = %e,
                "Failed to open book database, falling back to in-memory repository"
            );
            Arc::new(InMemoryBookRepository::new())
        }
    }
}

/// 打开 Sled 设置存储，失败时退回内存实现
fn open_settings_store(config: &AppConfig) -> Arc<dyn SettingsStorePort> {
    match SledSettingsStore::open(&config.storage.settings_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(
                path = ?config.storage.settings_path,
                error = %e,
                "Failed to open settings store, falling back to in-memory settings"
            );
            Arc::new(InMemorySettingsStore::new())
        }
    }
}

/// 确保数据目录存在
async fn ensure_parent_dir(path: &std::path::Path) {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    if let Err(e) = tokio::fs::create_dir_all(parent).await {
        tracing::error!(dir = ?parent, error = %e, "Failed to create data directory");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("zenreader {}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 目录创建失败不退出，后续打开存储失败时会退回内存实现
    ensure_parent_dir(std::path::Path::new(&config.database.path)).await;
    ensure_parent_dir(&config.storage.settings_path).await;

    let book_repo = open_book_repository(&config).await;
    let settings_store = open_settings_store(&config);

    let state = AppState::new(book_repo, settings_store, config.storage.max_upload_size);
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zenreader::domain::ReaderSettings;

    #[tokio::test]
    async fn test_unusable_data_dir_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let mut config = AppConfig::default();
        config.database.path = blocker.join("db/zenreader.db").to_string_lossy().to_string();
        config.storage.settings_path = blocker.join("settings.sled");

        ensure_parent_dir(std::path::Path::new(&config.database.path)).await;
        ensure_parent_dir(&config.storage.settings_path).await;

        let book_repo = open_book_repository(&config).await;
        let settings_store = open_settings_store(&config);

        assert!(book_repo.list_all().await.unwrap().is_empty());
        assert_eq!(settings_store.load().unwrap(), ReaderSettings::default());
    }
}
