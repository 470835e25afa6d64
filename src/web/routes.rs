//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建 FAQ API 路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/faqs/create-faq", post(create_faq))
        .route("/api/faqs/stats", get(faq_stats))
        // 不带 ID 的更新/删除由服务层返回 400
        .route(
            "/api/faqs",
            get(list_faqs).put(update_faq).delete(delete_faq),
        )
        .route("/api/faqs/:id", put(update_faq).delete(delete_faq))
        // 基础管理功能
        .route("/api/cache/clear", post(clear_cache))
}
