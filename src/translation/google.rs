//! Google 翻译后端
//!
//! 调用 `translate_a/single` 接口（`client=gtx`），源语言自动检测。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::Translator;
use crate::env::{self, EnvResult, EnvVar};
use crate::error::{FaqError, FaqResult};

/// 翻译后端配置
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// API 基础地址
    pub api_url: String,
    /// 单次请求超时
    pub timeout: Duration,
}

impl TranslatorConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            api_url: env::translation::ApiUrl::get()?,
            timeout: env::translation::Timeout::get()?,
        })
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load translator config from environment: {}. Using defaults.", e);
            Self {
                api_url: "https://translate.googleapis.com".to_string(),
                timeout: Duration::from_secs(10),
            }
        })
    }
}

/// 基于 HTTP 的 Google 翻译客户端
#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    config: TranslatorConfig,
}

impl GoogleTranslator {
    /// 创建翻译客户端
    pub fn new(config: TranslatorConfig) -> FaqResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.config.api_url)
    }
}

/// 拼接响应中的译文片段
///
/// 响应格式为 `[[["译文", "原文", ...], ...], ...]`，长文本会被拆成多个片段。
fn extract_translation(body: &Value) -> FaqResult<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| FaqError::Translation("响应格式无效: 缺少译文片段".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(FaqError::Translation("响应中没有译文".to_string()));
    }

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> FaqResult<String> {
        tracing::debug!("开始翻译: {} 字符 -> {}", text.chars().count(), target_lang);

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FaqError::Translation(format!(
                "翻译服务返回 HTTP {}",
                status.as_u16()
            )));
        }

        let body: Value = response.json().await?;
        let translated = extract_translation(&body)?;

        tracing::debug!("翻译完成: {}", target_lang);
        Ok(translated)
    }
}
