//! HTTP API 测试
//!
//! 使用进程内的协作方构建路由，验证路径、状态码与响应结构

#![cfg(feature = "web")]

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use polyglot_faq::web::{create_router, AppState};

fn router(env: &TestEnvironment) -> Router {
    create_router(Arc::new(AppState::new(env.service.clone())))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    dispatch(app, request).await
}

/// 发送原始 JSON 文本（可能无法解析）
async fn send_raw(app: Router, method: Method, uri: &str, raw: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();

    dispatch(app, request).await
}

async fn dispatch(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_via_api(env: &TestEnvironment, lang: &str) -> Value {
    let (status, body) = send(
        router(env),
        Method::POST,
        "/api/faqs/create-faq",
        Some(json!({
            "question": "Why are APIs important?",
            "answer": "APIs enable integration.",
            "targetLanguage": lang,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    body
}

/// 测试创建接口的响应结构
#[tokio::test]
async fn test_create_faq_endpoint() {
    let env = TestEnvironment::new();
    let body = create_via_api(&env, "hi").await;

    assert_eq!(body["message"], "FAQ successfully created");
    assert!(body["faq"]["_id"].as_str().is_some());
    assert_eq!(body["faq"]["question"], "Why are APIs important?");
    assert_eq!(
        body["faq"]["translations"]["hi"]["question"],
        "[hi] Why are APIs important?"
    );

    println!("✅ 创建接口测试通过");
}

/// 测试列表接口按语言返回视图
#[tokio::test]
async fn test_list_faqs_endpoint() {
    let env = TestEnvironment::new();
    create_via_api(&env, "hi").await;

    let (status, body) = send(router(&env), Method::GET, "/api/faqs?targetLanguage=hi", None).await;
    assert_eq!(status, StatusCode::OK);

    let faqs = body["translatedFaqs"].as_array().unwrap();
    assert_eq!(faqs.len(), 1);
    assert_eq!(faqs[0]["question"], "[hi] Why are APIs important?");
    assert_eq!(faqs[0]["answer"], "[hi] APIs enable integration.");

    // 未指定语言时回退到原文
    let (_, body) = send(router(&env), Method::GET, "/api/faqs", None).await;
    assert_eq!(body["translatedFaqs"][0]["question"], "Why are APIs important?");
}

/// 测试更新接口
#[tokio::test]
async fn test_update_faq_endpoint() {
    let env = TestEnvironment::new();
    let created = create_via_api(&env, "hi").await;
    let id = created["faq"]["_id"].as_str().unwrap();

    let (status, body) = send(
        router(&env),
        Method::PUT,
        &format!("/api/faqs/{}", id),
        Some(json!({
            "question": "What is REST?",
            "answer": "An architectural style.",
            "targetLanguage": "bn",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "FAQ updated successfully");
    assert_eq!(body["UpdatedFAQ"]["_id"], id);
    assert_eq!(body["UpdatedFAQ"]["question"], "What is REST?");
    assert!(body["UpdatedFAQ"]["translations"]["hi"].is_null());
    assert_eq!(
        body["UpdatedFAQ"]["translations"]["bn"]["answer"],
        "[bn] An architectural style."
    );
}

/// 测试更新不存在的记录返回 404
#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let env = TestEnvironment::new();

    let (status, body) = send(
        router(&env),
        Method::PUT,
        "/api/faqs/unknown",
        Some(json!({ "question": "Q", "answer": "A" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("unknown"));
}

/// 测试缺少 ID 的更新和删除返回 400
#[tokio::test]
async fn test_missing_id_is_400() {
    let env = TestEnvironment::new();

    let (status, body) = send(
        router(&env),
        Method::PUT,
        "/api/faqs",
        Some(json!({ "question": "Q", "answer": "A", "targetLanguage": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "FAQ ID is required" }));

    let (status, body) = send(router(&env), Method::DELETE, "/api/faqs", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "FAQ ID is required");

    assert_eq!(env.store.total_calls(), 0);
}

/// 测试删除接口，请求体可选且重复删除成功
#[tokio::test]
async fn test_delete_faq_endpoint() {
    let env = TestEnvironment::new();
    let created = create_via_api(&env, "hi").await;
    let id = created["faq"]["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/faqs/{}", id);

    let (status, body) = send(
        router(&env),
        Method::DELETE,
        &uri,
        Some(json!({ "targetLanguage": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "FAQ deleted successfully");

    let (status, _) = send(router(&env), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(env.store.deletes.load(Ordering::SeqCst), 2);

    let (_, body) = send(router(&env), Method::GET, "/api/faqs?targetLanguage=hi", None).await;
    assert!(body["translatedFaqs"].as_array().unwrap().is_empty());
}

/// 测试协作方故障返回 500 与统一错误消息
#[tokio::test]
async fn test_internal_error_shape() {
    let env = TestEnvironment::new();
    env.store.set_failing(true);

    let (status, body) = send(router(&env), Method::GET, "/api/faqs?targetLanguage=hi", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert!(body["error"].as_str().unwrap().contains("connection reset"));
}

/// 测试空问题返回 400
#[tokio::test]
async fn test_blank_question_is_400() {
    let env = TestEnvironment::new();

    let (status, _) = send(
        router(&env),
        Method::POST,
        "/api/faqs/create-faq",
        Some(json!({ "question": " ", "answer": "A" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(env.store.total_calls(), 0);
}

/// 测试统计与缓存清理接口
#[tokio::test]
async fn test_stats_and_cache_clear() {
    let env = TestEnvironment::new();
    create_via_api(&env, "hi").await;
    send(router(&env), Method::GET, "/api/faqs?targetLanguage=hi", None).await;
    send(router(&env), Method::GET, "/api/faqs?targetLanguage=hi", None).await;

    let (status, stats) = send(router(&env), Method::GET, "/api/faqs/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["cache_hits"], 1);
    assert_eq!(stats["cache_misses"], 1);
    assert_eq!(stats["hit_rate"], 0.5);

    let (status, body) = send(
        router(&env),
        Method::POST,
        "/api/cache/clear",
        Some(json!({ "targetLanguage": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["key"], "faqs:hi");
    assert!(env.cached("hi").await.is_none());
}

/// 测试删除请求体无法解析时返回 400，记录与缓存都不变
#[tokio::test]
async fn test_delete_with_malformed_body_is_400() {
    let env = TestEnvironment::new();
    let created = create_via_api(&env, "hi").await;
    let id = created["faq"]["_id"].as_str().unwrap().to_string();
    send(router(&env), Method::GET, "/api/faqs?targetLanguage=hi", None).await;
    send(router(&env), Method::GET, "/api/faqs", None).await;

    let (status, body) = send_raw(
        router(&env),
        Method::DELETE,
        &format!("/api/faqs/{}", id),
        r#"{"targetLanguage": "hi""#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().is_some());
    assert_eq!(env.store.deletes.load(Ordering::SeqCst), 0);
    assert_eq!(env.store.inner.len().await, 1);
    // 默认语言的缓存也没有被误失效
    assert!(env.cached("hi").await.is_some());
    assert!(env.cached("en").await.is_some());

    // 类型不符同样拒绝
    let (status, _) = send_raw(
        router(&env),
        Method::DELETE,
        &format!("/api/faqs/{}", id),
        r#"{"targetLanguage": 42}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(env.store.deletes.load(Ordering::SeqCst), 0);
}

/// 测试缓存清理请求体无法解析时返回 400
#[tokio::test]
async fn test_cache_clear_with_malformed_body_is_400() {
    let env = TestEnvironment::new();
    send(router(&env), Method::GET, "/api/faqs", None).await;

    let (status, _) = send_raw(router(&env), Method::POST, "/api/cache/clear", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(env.cached("en").await.is_some());

    // 省略请求体时清理默认语言
    let (status, body) = send(router(&env), Method::POST, "/api/cache/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key"], "faqs:en");
    assert!(env.cached("en").await.is_none());
}

/// 测试不带 ID 的更新在请求体缺失或无效时仍返回 ID 缺失
#[tokio::test]
async fn test_update_without_id_reports_missing_id_before_body() {
    let env = TestEnvironment::new();

    let (status, body) = send(router(&env), Method::PUT, "/api/faqs", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "FAQ ID is required");

    let (status, body) = send_raw(router(&env), Method::PUT, "/api/faqs", r#"{"question":"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "FAQ ID is required");

    let (status, body) = send(router(&env), Method::PUT, "/api/faqs", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "FAQ ID is required");

    assert_eq!(env.store.total_calls(), 0);
}

/// 测试带 ID 的更新请求体无效时返回 400
#[tokio::test]
async fn test_update_with_malformed_body_is_400() {
    let env = TestEnvironment::new();
    let created = create_via_api(&env, "hi").await;
    let id = created["faq"]["_id"].as_str().unwrap().to_string();

    let (status, body) = send_raw(
        router(&env),
        Method::PUT,
        &format!("/api/faqs/{}", id),
        r#"{"question": "Q""#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().is_some());
    assert_eq!(env.store.updates.load(Ordering::SeqCst), 0);
}
