//! 进程内缓存存储
//!
//! 基于 LRU 的键值缓存，每个条目有独立的过期时间。
//! Redis 不可用时作为回退，也用于测试。

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use super::CacheStore;
use crate::env::{self, EnvVar};
use crate::error::FaqResult;

/// 缓存条目
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 进程内缓存配置
#[derive(Debug, Clone)]
pub struct MemoryCacheConfig {
    /// 最多保存的键数量
    pub capacity: usize,
}

impl MemoryCacheConfig {
    pub fn from_env() -> env::EnvResult<Self> {
        Ok(Self {
            capacity: env::cache::LocalCacheSize::get()?,
        })
    }
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load memory cache config from environment: {}. Using defaults.", e);
            Self { capacity: 256 }
        })
    }
}

/// 进程内 LRU 缓存
#[derive(Clone)]
pub struct MemoryCacheStore {
    cache: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCacheStore {
    /// 创建指定容量的缓存
    pub fn new(config: MemoryCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// 剩余存活时间，键不存在或已过期时返回 `None`
    pub async fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let cache = self.cache.read().await;
        cache
            .peek(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now()))
    }

    /// 未过期条目数量
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.iter().filter(|(_, entry)| !entry.is_expired()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 清理过期条目，返回清理数量
    pub async fn cleanup_expired(&self) -> usize {
        let mut cache = self.cache.write().await;
        let expired: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            cache.pop(key);
        }
        expired.len()
    }

    /// 启动后台任务，按固定周期清理过期条目
    pub fn spawn_cleanup(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let cache = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = cache.cleanup_expired().await;
                if removed > 0 {
                    tracing::debug!("清理过期缓存条目: {}", removed);
                }
            }
        })
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new(MemoryCacheConfig::default())
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> FaqResult<Option<String>> {
        let mut cache = self.cache.write().await;

        let cached = cache.get(key).cloned();
        match cached {
            Some(entry) if entry.is_expired() => {
                cache.pop(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value)),
            None => Ok(None),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> FaqResult<()> {
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.cache.write().await.put(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> FaqResult<()> {
        self.cache.write().await.pop(key);
        Ok(())
    }
}
