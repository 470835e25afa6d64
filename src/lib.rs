//! # Polyglot FAQ Library
//!
//! 多语言 FAQ 的增删改查服务：写入时翻译，按语言读穿透缓存，写后失效缓存。
//!
//! ## 模块组织
//!
//! - `faq` - 核心业务逻辑（服务、数据类型、统计）
//! - `storage` - 持久化存储与缓存存储的能力接口及实现
//! - `translation` - 翻译服务能力接口及实现
//! - `env` - 类型安全的环境变量配置
//! - `error` - 统一错误类型
//! - `redis_cache` - Redis 缓存（需要 `web` feature）
//! - `web` - Web服务器功能（需要 `web` feature）

pub mod env;
pub mod error;
pub mod faq;
#[cfg(feature = "web")]
pub mod redis_cache;
pub mod storage;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use error::{FaqError, FaqResult};
pub use faq::{FaqService, FaqServiceConfig};
