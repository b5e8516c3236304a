//! Settings HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetSettings, UpdateSettings};
use crate::domain::ReaderSettingsPatch;
use crate::infrastructure::http::dto::{ApiResponse, SettingsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取阅读设置
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let settings = state.get_settings_handler.handle(GetSettings)?;
    Ok(Json(ApiResponse::success(SettingsResponse::from(settings))))
}

/// 更新阅读设置（只需提供要修改的字段）
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<ReaderSettingsPatch>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let settings = state
        .update_settings_handler
        .handle(UpdateSettings { patch })?;
    Ok(Json(ApiResponse::success(SettingsResponse::from(settings))))
}
