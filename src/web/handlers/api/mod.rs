//! API 处理器

pub mod cache;
pub mod faq;

pub use cache::*;
pub use faq::*;

use axum::{
    body::Bytes,
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use serde::de::DeserializeOwned;

use crate::error::FaqError;

/// 处理器统一的错误响应
pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// 将服务错误映射为 HTTP 错误响应
///
/// 客户端错误返回错误消息本身；协作方故障统一返回 `Internal server error`，
/// 具体原因放在 `error` 字段中。
pub fn error_response(err: FaqError) -> ApiError {
    let status = err.status_code();

    let body = if status.is_server_error() {
        tracing::error!("请求处理失败: {}", err);
        serde_json::json!({
            "message": "Internal server error",
            "error": err.to_string(),
        })
    } else {
        serde_json::json!({
            "message": err.to_string(),
        })
    };

    (status, Json(body))
}

/// 请求体解析失败统一返回 400
pub fn rejection_response(rejection: JsonRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "message": rejection.body_text(),
        })),
    )
}

/// 解析可省略的 JSON 请求体
///
/// 请求体为空或不是 JSON 内容类型时视为省略，使用默认值；
/// 声明为 JSON 但无法解析时返回 400，不做静默回退。
pub fn optional_json<T>(headers: &HeaderMap, body: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) || !is_json_content_type(headers) {
        return Ok(T::default());
    }

    Json::<T>::from_bytes(body)
        .map(|Json(value)| value)
        .map_err(rejection_response)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}
