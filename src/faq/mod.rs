//! # FAQ模块
//!
//! 多语言 FAQ 的核心业务逻辑：
//!
//! - 创建/更新时调用翻译服务，保存原文与目标语言译文
//! - 按语言读取 FAQ 列表，带读穿透缓存
//! - 写操作后失效对应语言的缓存
//!
//! ## 模块组织
//!
//! - `types` - 数据类型定义
//! - `service` - 业务逻辑服务层
//! - `stats` - 服务统计信息
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use polyglot_faq::faq::{CreateFaq, FaqService, FaqServiceConfig};
//! use polyglot_faq::storage::{MemoryCacheStore, MemoryFaqStore};
//! # use polyglot_faq::translation::Translator;
//!
//! # async fn example(translator: Arc<dyn Translator>) -> polyglot_faq::error::FaqResult<()> {
//! let service = FaqService::new(
//!     translator,
//!     Arc::new(MemoryFaqStore::new()),
//!     Arc::new(MemoryCacheStore::default()),
//!     FaqServiceConfig::default(),
//! );
//!
//! service
//!     .create(CreateFaq {
//!         question: "Why are APIs important?".to_string(),
//!         answer: "APIs enable integration.".to_string(),
//!         target_language: Some("hi".to_string()),
//!     })
//!     .await?;
//!
//! let faqs = service.list(Some("hi")).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod service;
pub mod stats;
pub mod types;

pub use service::{FaqService, FaqServiceConfig};
pub use stats::{ServiceStats, StatsSnapshot};
pub use types::*;

/// 请求语言没有译文时的回退语言，同时也是默认请求语言
pub const FALLBACK_LANGUAGE: &str = "en";

/// 缓存列表默认存活时间
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// 缓存键默认前缀
pub const DEFAULT_CACHE_KEY_PREFIX: &str = "faqs:";
