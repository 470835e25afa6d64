//! # FAQ 数据类型定义
//!
//! 定义了 FAQ 记录、翻译映射、展示视图以及服务输入等数据结构

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 语言代码到翻译内容的映射，每个语言代码最多一条
pub type TranslationMap = BTreeMap<String, Translation>;

/// 单一语言的翻译内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// 翻译后的问题
    pub question: String,
    /// 翻译后的答案
    pub answer: String,
}

/// 持久化存储中的 FAQ 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    /// 由持久化存储分配的唯一标识
    #[serde(rename = "_id")]
    pub id: String,
    /// 原始问题（未翻译）
    pub question: String,
    /// 原始答案（未翻译）
    pub answer: String,
    /// 各语言翻译
    #[serde(default)]
    pub translations: TranslationMap,
}

/// 面向某一语言的 FAQ 展示视图
///
/// 与 [`FaqRecord`] 字段相同，`question`/`answer` 被替换为请求语言的解析结果，
/// `translations` 保留完整映射。缓存中存储的就是该类型的序列化列表。
pub type FaqView = FaqRecord;

/// 新建记录时写入持久化存储的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub translations: TranslationMap,
}

/// 更新记录时写入持久化存储的字段
///
/// `translations` 整体替换原有映射，不做逐语言合并。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqChanges {
    pub question: String,
    pub answer: String,
    pub translations: TranslationMap,
}

/// 创建 FAQ 请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
    /// 目标语言，缺省时使用默认语言
    #[serde(default)]
    pub target_language: Option<String>,
}

/// 更新 FAQ 请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFaq {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub target_language: Option<String>,
}

impl FaqRecord {
    /// 按请求语言解析展示视图
    ///
    /// 回退顺序：请求语言 → 英语 → 原始文本。
    pub fn view_for(&self, target_language: &str) -> FaqView {
        let resolved = self
            .translations
            .get(target_language)
            .or_else(|| self.translations.get(super::FALLBACK_LANGUAGE));

        let (question, answer) = match resolved {
            Some(translation) => (translation.question.clone(), translation.answer.clone()),
            None => (self.question.clone(), self.answer.clone()),
        };

        FaqView {
            id: self.id.clone(),
            question,
            answer,
            translations: self.translations.clone(),
        }
    }
}
