//! # FAQ 服务层
//!
//! 协调翻译服务、持久化存储与缓存存储，负责缓存的读穿透与写失效策略。
//!
//! ## 缓存策略
//!
//! - 缓存键为 `<前缀><语言代码>`（默认 `faqs:hi` 这样的形式），值为该语言完整 FAQ 视图列表的 JSON
//! - 读：命中即直接返回，不访问持久化存储；未命中时从持久化存储构建视图列表并写回缓存
//! - 写：创建、更新、删除成功后只删除请求语言对应的缓存键，其他语言的缓存保持不变，
//!   直到 TTL 到期或被单独失效
//!
//! 缓存内容按 [`FaqView`] 的结构解析：命中时返回的是解析后的视图，
//! 与其他写入方共享缓存键时，视图之外的字段（如 `__v`、`createdAt`）不会出现在结果中。
//! 结构不符的内容视为损坏，丢弃后回源。
//!
//! 失效与回填之间不是原子的：并发的列表请求可能用旧数据回填刚被失效的键，
//! 这种不一致最多持续一个 TTL。

use std::sync::Arc;
use std::time::Duration;

use crate::env::{self, EnvResult, EnvVar};
use crate::error::{FaqError, FaqResult};
use crate::storage::{CacheStore, FaqStore};
use crate::translation::Translator;

use super::stats::{ServiceStats, StatsSnapshot};
use super::types::*;

/// FAQ 服务配置
#[derive(Debug, Clone)]
pub struct FaqServiceConfig {
    /// 请求未指定语言时使用的语言
    pub default_language: String,
    /// 缓存列表的存活时间
    pub cache_ttl: Duration,
    /// 缓存键前缀
    pub cache_key_prefix: String,
}

impl FaqServiceConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            default_language: env::core::DefaultLanguage::get()?,
            cache_ttl: env::cache::Ttl::get()?,
            cache_key_prefix: env::cache::KeyPrefix::get()?,
        })
    }
}

impl Default for FaqServiceConfig {
    fn default() -> Self {
        Self {
            default_language: super::FALLBACK_LANGUAGE.to_string(),
            cache_ttl: super::DEFAULT_CACHE_TTL,
            cache_key_prefix: super::DEFAULT_CACHE_KEY_PREFIX.to_string(),
        }
    }
}

/// FAQ 服务
///
/// 所有协作方都以能力接口注入，服务本身除统计计数外不持有可变共享状态，
/// 可以通过 `Arc` 在并发请求间共享。
pub struct FaqService {
    translator: Arc<dyn Translator>,
    store: Arc<dyn FaqStore>,
    cache: Arc<dyn CacheStore>,
    config: FaqServiceConfig,
    stats: ServiceStats,
}

impl FaqService {
    /// 创建新的 FAQ 服务实例
    pub fn new(
        translator: Arc<dyn Translator>,
        store: Arc<dyn FaqStore>,
        cache: Arc<dyn CacheStore>,
        config: FaqServiceConfig,
    ) -> Self {
        Self {
            translator,
            store,
            cache,
            config,
            stats: ServiceStats::default(),
        }
    }

    pub fn config(&self) -> &FaqServiceConfig {
        &self.config
    }

    /// 获取统计信息快照
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// 指定语言的缓存键
    pub fn cache_key(&self, language: &str) -> String {
        format!("{}{}", self.config.cache_key_prefix, language)
    }

    /// 创建 FAQ
    ///
    /// 先翻译再持久化，保存的是原始问题与答案以及单一语言的翻译；
    /// 成功后仅失效目标语言的缓存。
    pub async fn create(&self, request: CreateFaq) -> FaqResult<FaqRecord> {
        require_text(&request.question, "question")?;
        require_text(&request.answer, "answer")?;
        let language = self.resolve_language(request.target_language.as_deref());

        tracing::info!("创建 FAQ，目标语言: {}", language);

        let translations = self
            .translate_pair(&request.question, &request.answer, &language)
            .await?;

        let faq = self
            .store
            .create(NewFaq {
                question: request.question,
                answer: request.answer,
                translations,
            })
            .await?;

        tracing::info!("FAQ 已创建: {}", faq.id);

        self.invalidate(&language).await?;
        Ok(faq)
    }

    /// 获取指定语言的 FAQ 列表（读穿透缓存）
    pub async fn list(&self, target_language: Option<&str>) -> FaqResult<Vec<FaqView>> {
        let language = self.resolve_language(target_language);
        let key = self.cache_key(&language);

        if let Some(cached) = self.read_cached(&key).await {
            self.stats.inc_cache_hits();
            tracing::debug!("缓存命中: {} ({} 条)", key, cached.len());
            return Ok(cached);
        }

        self.stats.inc_cache_misses();
        tracing::debug!("缓存未命中，查询 {} 存储: {}", self.store.name(), key);

        let faqs = self.store.find_all().await?;
        let views: Vec<FaqView> = faqs.iter().map(|faq| faq.view_for(&language)).collect();

        let serialized = serde_json::to_string(&views)?;
        match self
            .cache
            .set_with_ttl(&key, &serialized, self.config.cache_ttl)
            .await
        {
            Ok(()) => tracing::info!("FAQ 列表已缓存: {} ({} 条)", key, views.len()),
            Err(e) => {
                self.stats.inc_cache_errors();
                tracing::warn!("缓存写入失败，直接返回存储数据: {}: {}", key, e);
            }
        }

        Ok(views)
    }

    /// 更新 FAQ
    ///
    /// 翻译映射被整体替换为目标语言的单一条目，其他语言的已有翻译会被丢弃。
    pub async fn update(&self, id: Option<&str>, request: UpdateFaq) -> FaqResult<FaqRecord> {
        let id = require_id(id)?;
        require_text(&request.question, "question")?;
        require_text(&request.answer, "answer")?;
        let language = self.resolve_language(request.target_language.as_deref());

        tracing::info!("更新 FAQ: {}，目标语言: {}", id, language);

        let translations = self
            .translate_pair(&request.question, &request.answer, &language)
            .await?;

        let updated = self
            .store
            .find_and_update(
                id,
                FaqChanges {
                    question: request.question,
                    answer: request.answer,
                    translations,
                },
            )
            .await?
            .ok_or_else(|| FaqError::NotFound(id.to_string()))?;

        self.invalidate(&language).await?;
        Ok(updated)
    }

    /// 删除 FAQ
    ///
    /// 删除不存在的记录不视为错误。
    pub async fn delete(&self, id: Option<&str>, target_language: Option<&str>) -> FaqResult<()> {
        let id = require_id(id)?;
        let language = self.resolve_language(target_language);

        tracing::info!("删除 FAQ: {}", id);

        self.store.find_and_delete(id).await?;
        self.invalidate(&language).await
    }

    /// 手动清除指定语言的缓存，返回被清除的缓存键
    pub async fn purge_cache(&self, target_language: Option<&str>) -> FaqResult<String> {
        let language = self.resolve_language(target_language);
        self.invalidate(&language).await?;
        Ok(self.cache_key(&language))
    }

    fn resolve_language(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(self.config.default_language.as_str())
            .to_string()
    }

    /// 分别翻译问题与答案，构建只含目标语言的翻译映射
    async fn translate_pair(
        &self,
        question: &str,
        answer: &str,
        language: &str,
    ) -> FaqResult<TranslationMap> {
        let (question, answer) = tokio::try_join!(
            self.translator.translate(question, language),
            self.translator.translate(answer, language),
        )
        .map_err(|e| {
            tracing::error!("{} 翻译失败 ({}): {}", self.translator.name(), language, e);
            e
        })?;

        let mut translations = TranslationMap::new();
        translations.insert(language.to_string(), Translation { question, answer });
        Ok(translations)
    }

    async fn invalidate(&self, language: &str) -> FaqResult<()> {
        let key = self.cache_key(language);

        self.cache.delete(&key).await.map_err(|e| {
            self.stats.inc_cache_errors();
            tracing::error!("缓存失效失败，写入已生效但缓存可能过期: {}: {}", key, e);
            e
        })?;

        self.stats.inc_invalidations();
        tracing::info!("缓存已失效: {}", key);
        Ok(())
    }

    /// 读取缓存列表；读取失败或内容损坏时返回 `None`，由调用方回源
    ///
    /// 只保留 [`FaqView`] 中定义的字段。
    async fn read_cached(&self, key: &str) -> Option<Vec<FaqView>> {
        let payload = match self.cache.get(key).await {
            Ok(payload) => payload?,
            Err(e) => {
                self.stats.inc_cache_errors();
                tracing::warn!("{} 缓存查询失败，回源持久化存储: {}", self.cache.name(), e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<FaqView>>(&payload) {
            Ok(views) => Some(views),
            Err(e) => {
                self.stats.inc_cache_errors();
                tracing::warn!("缓存内容损坏，已丢弃: {}: {}", key, e);
                if let Err(e) = self.cache.delete(key).await {
                    tracing::warn!("删除损坏的缓存失败: {}: {}", key, e);
                }
                None
            }
        }
    }
}

fn require_id(id: Option<&str>) -> FaqResult<&str> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(FaqError::MissingId)
}

fn require_text(value: &str, field: &str) -> FaqResult<()> {
    if value.trim().is_empty() {
        return Err(FaqError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(Some("abc")).unwrap(), "abc");
        assert_eq!(require_id(Some(" abc ")).unwrap(), "abc");
        assert_eq!(require_id(None), Err(FaqError::MissingId));
        assert_eq!(require_id(Some("   ")), Err(FaqError::MissingId));
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("Why?", "question").is_ok());
        assert!(matches!(
            require_text("  ", "answer"),
            Err(FaqError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let config = FaqServiceConfig::default();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.cache_key_prefix, "faqs:");
    }
}
