//! Web 模块的数据类型定义

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::faq::{FaqRecord, FaqService, FaqView};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub faq_service: Arc<FaqService>,
}

impl AppState {
    pub fn new(faq_service: Arc<FaqService>) -> Self {
        Self { faq_service }
    }
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFaqsQuery {
    pub target_language: Option<String>,
}

/// 删除请求（请求体可省略）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFaqRequest {
    pub target_language: Option<String>,
}

/// 缓存清理请求
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheClearRequest {
    pub target_language: Option<String>,
}

/// 创建响应
#[derive(Debug, Serialize)]
pub struct CreateFaqResponse {
    pub message: String,
    pub faq: FaqRecord,
}

/// 列表响应
#[derive(Debug, Serialize)]
pub struct ListFaqsResponse {
    #[serde(rename = "translatedFaqs")]
    pub translated_faqs: Vec<FaqView>,
}

/// 更新响应
#[derive(Debug, Serialize)]
pub struct UpdateFaqResponse {
    pub message: String,
    #[serde(rename = "UpdatedFAQ")]
    pub updated_faq: FaqRecord,
}

/// 只包含消息的响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 缓存清理响应
#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    pub success: bool,
    pub message: String,
    pub key: String,
}
