//! FAQ 相关API处理器

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Json as ExtractJson, Path, Query, State},
    http::HeaderMap,
    response::Json,
};

use super::{error_response, optional_json, rejection_response, ApiError};
use crate::error::FaqError;
use crate::faq::{CreateFaq, StatsSnapshot, UpdateFaq};
use crate::web::types::{
    AppState, CreateFaqResponse, DeleteFaqRequest, ListFaqsQuery, ListFaqsResponse,
    MessageResponse, UpdateFaqResponse,
};

/// 创建 FAQ
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<CreateFaq>,
) -> Result<Json<CreateFaqResponse>, ApiError> {
    let faq = state
        .faq_service
        .create(request)
        .await
        .map_err(error_response)?;

    Ok(Json(CreateFaqResponse {
        message: "FAQ successfully created".to_string(),
        faq,
    }))
}

/// 获取指定语言的 FAQ 列表
pub async fn list_faqs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFaqsQuery>,
) -> Result<Json<ListFaqsResponse>, ApiError> {
    let translated_faqs = state
        .faq_service
        .list(query.target_language.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(ListFaqsResponse { translated_faqs }))
}

/// 更新 FAQ
///
/// 同时挂载在带 ID 与不带 ID 的路径上，缺少 ID 时由服务层返回客户端错误。
/// 缺少 ID 的判断先于请求体解析。
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    id: Option<Path<String>>,
    request: Result<ExtractJson<UpdateFaq>, JsonRejection>,
) -> Result<Json<UpdateFaqResponse>, ApiError> {
    let id = id.map(|Path(id)| id);

    let request = match request {
        Ok(ExtractJson(request)) => request,
        Err(_) if id.as_deref().map_or(true, |id| id.trim().is_empty()) => {
            return Err(error_response(FaqError::MissingId));
        }
        Err(rejection) => return Err(rejection_response(rejection)),
    };

    let updated_faq = state
        .faq_service
        .update(id.as_deref(), request)
        .await
        .map_err(error_response)?;

    Ok(Json(UpdateFaqResponse {
        message: "FAQ updated successfully".to_string(),
        updated_faq,
    }))
}

/// 删除 FAQ
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    id: Option<Path<String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = id.map(|Path(id)| id);
    let request: DeleteFaqRequest = optional_json(&headers, &body)?;

    state
        .faq_service
        .delete(id.as_deref(), request.target_language.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "FAQ deleted successfully".to_string(),
    }))
}

/// 获取服务统计信息
pub async fn faq_stats(State(state): State<Arc<AppState>>) -> Json<StatsSnapshot> {
    Json(state.faq_service.stats())
}
