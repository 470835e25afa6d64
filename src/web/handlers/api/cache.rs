//! 缓存相关API处理器

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::HeaderMap, response::Json};

use super::{error_response, optional_json, ApiError};
use crate::web::types::{AppState, CacheClearRequest, CacheClearResponse};

/// 清除指定语言的 FAQ 缓存
///
/// 请求体可省略，省略时清除默认语言的缓存。
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CacheClearResponse>, ApiError> {
    let request: CacheClearRequest = optional_json(&headers, &body)?;

    let key = state
        .faq_service
        .purge_cache(request.target_language.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(CacheClearResponse {
        success: true,
        message: format!("成功清理缓存 {}", key),
        key,
    }))
}
