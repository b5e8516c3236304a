//! Book HTTP Handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::{DeleteBook, GetBook, GetChapter, ImportBook, ListBooks, UpdateProgress};
use crate::infrastructure::http::dto::{
    ApiResponse, BookResponse, BookSummaryResponse, ChapterResponse, Empty, FileNameRequest,
    GetChapterRequest, ImportBookRequest, ImportBookResponse, UpdateProgressRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

async fn import(state: &AppState, file_name: String, text: String) -> Result<ImportBookResponse, ApiError> {
    let result = state
        .import_book_handler
        .handle(ImportBook { file_name, text })
        .await?;

    Ok(ImportBookResponse {
        persisted: result.persisted,
        book: BookResponse::from(&result.book),
    })
}

/// 上传 TXT 文件（multipart 字段 `file`）
pub async fn upload_book(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportBookResponse>>, ApiError> {
    let mut upload: Option<(String, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::BadRequest("File name is required".to_string()))?;

        // 验证文件类型：.txt 扩展名或 text/plain
        let content_type = field.content_type().unwrap_or("application/octet-stream");
        let is_txt = file_name.to_lowercase().ends_with(".txt");
        if !is_txt && !content_type.starts_with("text/plain") {
            return Err(ApiError::BadRequest("Only TXT files are allowed".to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        if bytes.len() as u64 > state.max_upload_size {
            return Err(ApiError::BadRequest(format!(
                "File too large. Maximum size is {} MB",
                state.max_upload_size / 1024 / 1024
            )));
        }

        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| ApiError::BadRequest("File must be valid UTF-8 text".to_string()))?;

        upload = Some((file_name, text));
    }

    let (file_name, text) =
        upload.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;

    tracing::info!(file_name = %file_name, bytes = text.len(), "Book uploaded");

    Ok(Json(ApiResponse::success(import(&state, file_name, text).await?)))
}

/// 以 JSON 形式导入文本
pub async fn import_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportBookRequest>,
) -> Result<Json<ApiResponse<ImportBookResponse>>, ApiError> {
    if req.content.len() as u64 > state.max_upload_size {
        return Err(ApiError::BadRequest("Content too large".to_string()));
    }

    Ok(Json(ApiResponse::success(
        import(&state, req.file_name, req.content).await?,
    )))
}

/// 书架列表
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BookSummaryResponse>>>, ApiError> {
    let books = state.list_books_handler.handle(ListBooks).await?;

    Ok(Json(ApiResponse::success(
        books.into_iter().map(BookSummaryResponse::from).collect(),
    )))
}

/// 获取书籍（含全部章节）
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FileNameRequest>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let book = state
        .get_book_handler
        .handle(GetBook {
            file_name: req.file_name,
        })
        .await?;

    Ok(Json(ApiResponse::success(BookResponse::from(&book))))
}

/// 获取单个章节
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let chapter = state
        .get_chapter_handler
        .handle(GetChapter {
            file_name: req.file_name,
            position: req.position,
        })
        .await?;

    Ok(Json(ApiResponse::success(ChapterResponse::from(&chapter))))
}

/// 更新阅读进度
pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateProgressRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .update_progress_handler
        .handle(UpdateProgress {
            file_name: req.file_name,
            chapter_index: req.chapter_index,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 删除书籍
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FileNameRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_book_handler
        .handle(DeleteBook {
            file_name: req.file_name,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
