//! 翻译模块
//!
//! 定义翻译服务能力接口 [`Translator`]。FAQ 服务只依赖该接口，
//! 具体的翻译后端可以替换而无需改动业务逻辑。
//!
//! - `google` - 基于 HTTP 的 Google 翻译后端（需要 `web` feature）

use async_trait::async_trait;

use crate::error::FaqResult;

#[cfg(feature = "web")]
pub mod google;

#[cfg(feature = "web")]
pub use google::{GoogleTranslator, TranslatorConfig};

/// 文本翻译能力
#[async_trait]
pub trait Translator: Send + Sync {
    /// 翻译后端名称，用于日志
    fn name(&self) -> &str;

    /// 将文本翻译为目标语言
    ///
    /// 翻译失败时返回 [`crate::error::FaqError::Translation`]，调用方将其视为整个操作失败。
    async fn translate(&self, text: &str, target_lang: &str) -> FaqResult<String>;
}
