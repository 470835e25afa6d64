//! # 存储抽象
//!
//! FAQ 服务依赖的两类外部存储：
//!
//! - [`FaqStore`] - 持久化存储，拥有 FAQ 记录的生命周期
//! - [`CacheStore`] - 带 TTL 的键值缓存，保存按语言派生的 FAQ 列表
//!
//! 单次操作由各实现保证原子性；跨两个存储的多步操作不是事务性的。
//!
//! ## 实现
//!
//! - `memory` - 进程内 FAQ 存储
//! - `cache` - 基于 LRU 的进程内缓存
//! - `mongo` - MongoDB FAQ 存储（需要 `web` feature）
//! - [`crate::redis_cache`] - Redis 缓存（需要 `web` feature）

use std::time::Duration;

use async_trait::async_trait;

use crate::error::FaqResult;
use crate::faq::types::{FaqChanges, FaqRecord, NewFaq};

pub mod cache;
pub mod memory;
#[cfg(feature = "web")]
pub mod mongo;

pub use cache::{MemoryCacheConfig, MemoryCacheStore};
pub use memory::MemoryFaqStore;
#[cfg(feature = "web")]
pub use mongo::{MongoConfig, MongoFaqStore};

/// FAQ 持久化存储
#[async_trait]
pub trait FaqStore: Send + Sync {
    /// 存储名称，用于日志
    fn name(&self) -> &str;

    /// 插入新记录并返回带 ID 的记录
    async fn create(&self, faq: NewFaq) -> FaqResult<FaqRecord>;

    /// 按插入顺序返回全部记录
    async fn find_all(&self) -> FaqResult<Vec<FaqRecord>>;

    /// 更新记录，返回更新后的记录；ID 不存在时返回 `None`
    async fn find_and_update(&self, id: &str, changes: FaqChanges)
        -> FaqResult<Option<FaqRecord>>;

    /// 删除记录；ID 不存在时同样视为成功
    async fn find_and_delete(&self, id: &str) -> FaqResult<()>;
}

/// 带过期时间的键值缓存
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 缓存名称，用于日志
    fn name(&self) -> &str;

    /// 读取缓存值，不存在或已过期时返回 `None`
    async fn get(&self, key: &str) -> FaqResult<Option<String>>;

    /// 写入缓存值并设置过期时间
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> FaqResult<()>;

    /// 删除缓存值；键不存在时同样视为成功
    async fn delete(&self, key: &str) -> FaqResult<()>;
}
