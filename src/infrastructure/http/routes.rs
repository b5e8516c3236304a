//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/book/upload        POST  上传 TXT（multipart 字段 `file`）
//! - /api/book/import        POST  以 JSON 导入文本
//! - /api/book/list          GET   书架（按最近阅读倒序）
//! - /api/book/get           POST  获取书籍及全部章节
//! - /api/book/chapter       POST  获取单个章节
//! - /api/book/progress      POST  更新阅读进度
//! - /api/book/delete        POST  删除书籍
//! - /api/settings           GET   获取阅读设置
//! - /api/settings/update    POST  更新阅读设置

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/book", book_routes())
        .nest("/settings", settings_routes())
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::upload_book))
        .route("/import", post(handlers::import_book))
        .route("/list", get(handlers::list_books))
        .route("/get", post(handlers::get_book))
        .route("/chapter", post(handlers::get_chapter))
        .route("/progress", post(handlers::update_progress))
        .route("/delete", post(handlers::delete_book))
}

/// Settings 路由
fn settings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_settings))
        .route("/update", post(handlers::update_settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::infrastructure::http::state::DEFAULT_MAX_UPLOAD_SIZE;
    use crate::infrastructure::memory::{InMemoryBookRepository, InMemorySettingsStore};

    const SAMPLE: &str = "作者的话\n第一章 开端\n正文一\n第二章 发展\n正文二";
    const BOUNDARY: &str = "zenreader-test-boundary";

    fn app_with_limit(max_upload_size: u64) -> Router {
        let state = AppState::new(
            Arc::new(InMemoryBookRepository::new()),
            Arc::new(InMemorySettingsStore::new()),
            max_upload_size,
        );
        create_routes().with_state(Arc::new(state))
    }

    fn app() -> Router {
        app_with_limit(DEFAULT_MAX_UPLOAD_SIZE)
    }

    async fn send(app: &Router, request: Request<Body>) -> Value {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_json(app: &Router, uri: &str) -> Value {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn post_file(app: &Router, file_name: &str, content_type: &str, content: &[u8]) -> Value {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/book/upload")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        send(app, request).await
    }

    async fn import(app: &Router, file_name: &str, content: &str) -> Value {
        post_json(
            app,
            "/api/book/import",
            json!({ "file_name": file_name, "content": content }),
        )
        .await
    }

    #[tokio::test]
    async fn test_ping() {
        let json = get_json(&app(), "/api/ping").await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_import_returns_segmented_book() {
        let app = app();
        let json = import(&app, "小说.txt", SAMPLE).await;

        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["persisted"], true);

        let book = &json["data"]["book"];
        assert_eq!(book["title"], "小说");
        let chapters = book["chapters"].as_array().unwrap();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0]["index"], -1);
        assert_eq!(chapters[0]["title"], "序章 / 简介");
        assert_eq!(chapters[1]["title"], "第一章 开端");
        assert_eq!(chapters[2]["content"], "正文二");
    }

    #[tokio::test]
    async fn test_upload_txt_file() {
        let app = app();
        let json = post_file(&app, "book.txt", "text/plain", "\u{feff}Chapter 1\nHello".as_bytes()).await;

        assert_eq!(json["errno"], 0);
        let chapters = json["data"]["book"]["chapters"].as_array().unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0]["title"], "Chapter 1");
        assert_eq!(chapters[0]["content"], "Hello");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_text_file() {
        let app = app();
        let json = post_file(&app, "book.epub", "application/epub+zip", b"PK\x03\x04").await;

        assert_eq!(json["errno"], 400);
        assert_eq!(json["error"], "Only TXT files are allowed");

        let list = get_json(&app, "/api/book/list").await;
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_other_text_types() {
        let app = app();
        let json = post_file(&app, "page.html", "text/html", b"<p>Chapter 1</p>").await;

        assert_eq!(json["errno"], 400);
        assert_eq!(json["error"], "Only TXT files are allowed");
    }

    #[tokio::test]
    async fn test_upload_accepts_text_plain_without_txt_suffix() {
        let app = app();
        let json = post_file(
            &app,
            "notes",
            "text/plain; charset=utf-8",
            "第一章 开始\n你好".as_bytes(),
        )
        .await;

        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["book"]["title"], "notes");
    }

    #[tokio::test]
    async fn test_import_strips_byte_order_mark() {
        let app = app();
        let json = import(&app, "a.txt", "\u{feff}第一章 开始\n你好\n第二章 结束\n世界").await;

        let chapters = json["data"]["book"]["chapters"].as_array().unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0]["index"], 0);
        assert_eq!(chapters[0]["title"], "第一章 开始");
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let app = app_with_limit(8);
        let json = post_file(&app, "big.txt", "text/plain", b"0123456789abcdef").await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_utf8() {
        let app = app();
        let json = post_file(&app, "gbk.txt", "text/plain", &[0xB5, 0xDA, 0xD2, 0xBB, 0xFF]).await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test]
    async fn test_get_chapter_and_out_of_range() {
        let app = app();
        import(&app, "a.txt", SAMPLE).await;

        let json = post_json(
            &app,
            "/api/book/chapter",
            json!({ "file_name": "a.txt", "position": 2 }),
        )
        .await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["title"], "第二章 发展");

        let json = post_json(
            &app,
            "/api/book/chapter",
            json!({ "file_name": "a.txt", "position": 3 }),
        )
        .await;
        assert_eq!(json["errno"], 404);
    }

    #[tokio::test]
    async fn test_progress_orders_bookshelf() {
        let app = app();
        import(&app, "a.txt", SAMPLE).await;
        import(&app, "b.txt", SAMPLE).await;

        let json = post_json(
            &app,
            "/api/book/progress",
            json!({ "file_name": "a.txt", "chapter_index": 1 }),
        )
        .await;
        assert_eq!(json["errno"], 0);

        let list = get_json(&app, "/api/book/list").await;
        let books = list["data"].as_array().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0]["file_name"], "a.txt");
        assert_eq!(books[0]["last_read_chapter_index"], 1);
        assert_eq!(books[0]["chapter_count"], 3);
        assert!(books[1]["last_read_time"].is_null());
    }

    #[tokio::test]
    async fn test_progress_out_of_range_is_rejected() {
        let app = app();
        import(&app, "a.txt", SAMPLE).await;

        let json = post_json(
            &app,
            "/api/book/progress",
            json!({ "file_name": "a.txt", "chapter_index": 9 }),
        )
        .await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test]
    async fn test_delete_book() {
        let app = app();
        import(&app, "a.txt", SAMPLE).await;

        let json = post_json(&app, "/api/book/delete", json!({ "file_name": "a.txt" })).await;
        assert_eq!(json["errno"], 0);

        let json = post_json(&app, "/api/book/get", json!({ "file_name": "a.txt" })).await;
        assert_eq!(json["errno"], 404);

        let json = post_json(&app, "/api/book/delete", json!({ "file_name": "a.txt" })).await;
        assert_eq!(json["errno"], 404);
    }

    #[tokio::test]
    async fn test_reimport_replaces_book() {
        let app = app();
        import(&app, "a.txt", SAMPLE).await;
        import(&app, "a.txt", "全新的内容").await;

        let json = post_json(&app, "/api/book/get", json!({ "file_name": "a.txt" })).await;
        let chapters = json["data"]["chapters"].as_array().unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0]["title"], "正文");
    }

    #[tokio::test]
    async fn test_settings_defaults_and_update() {
        let app = app();

        let json = get_json(&app, "/api/settings").await;
        assert_eq!(json["data"]["scroll_amount"], 100);
        assert_eq!(json["data"]["font_size"], 20);
        assert_eq!(json["data"]["theme"], "beige");

        let json = post_json(
            &app,
            "/api/settings/update",
            json!({ "font_size": 24, "theme": "dark" }),
        )
        .await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["font_size"], 24);
        assert_eq!(json["data"]["scroll_amount"], 100);

        let json = get_json(&app, "/api/settings").await;
        assert_eq!(json["data"]["theme"], "dark");
    }

    #[tokio::test]
    async fn test_settings_update_rejects_out_of_range() {
        let app = app();
        let json = post_json(&app, "/api/settings/update", json!({ "font_size": 500 })).await;
        assert_eq!(json["errno"], 400);

        let json = get_json(&app, "/api/settings").await;
        assert_eq!(json["data"]["font_size"], 20);
    }
}
