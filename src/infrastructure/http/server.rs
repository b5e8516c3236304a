//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::request_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// multipart 头部等额外开销
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5080,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // 阅读前端可能从 file:// 或其他端口打开
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600));

        // 请求体上限跟随上传上限；精确的文件大小校验在 handler 中完成
        let body_limit = usize::try_from(self.state.max_upload_size)
            .unwrap_or(usize::MAX)
            .saturating_add(BODY_LIMIT_OVERHEAD);

        create_routes()
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(middleware::from_fn(request_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use crate::infrastructure::memory::{InMemoryBookRepository, InMemorySettingsStore};

    fn server(max_upload_size: u64) -> HttpServer {
        let state = AppState::new(
            Arc::new(InMemoryBookRepository::new()),
            Arc::new(InMemorySettingsStore::new()),
            max_upload_size,
        );
        HttpServer::new(ServerConfig::default(), state)
    }

    #[test]
    fn test_server_config_addr() {
        assert_eq!(ServerConfig::new("0.0.0.0", 8080).addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_router_serves_ping() {
        let router = server(1024).build_router();
        let request = Request::builder()
            .uri("/api/ping")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_body_limit_rejects_huge_payload() {
        let router = server(16).build_router();
        let payload = format!(
            r#"{{"file_name":"a.txt","content":"{}"}}"#,
            "x".repeat(BODY_LIMIT_OVERHEAD * 2)
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/book/import")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
