//! Redis 缓存模块
//!
//! 为 FAQ 服务提供按语言划分的 Redis 缓存（`GET` / `SETEX` / `DEL`）

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use crate::env::{self, EnvResult, EnvVar};
use crate::error::FaqResult;
use crate::storage::CacheStore;

/// Redis 缓存配置
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    pub url: String,
}

impl RedisCacheConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            url: env::redis::Url::get()?,
        })
    }
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load Redis config from environment: {}. Using defaults.", e);
            Self {
                url: "redis://127.0.0.1:6379".to_string(),
            }
        })
    }
}

/// Redis 缓存客户端
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl RedisCache {
    /// 创建新的 Redis 缓存实例并建立连接
    pub async fn connect(config: RedisCacheConfig) -> FaqResult<Self> {
        let client = Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection, config })
    }

    /// 测试 Redis 连接
    pub async fn test_connection(&self) -> FaqResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// 连接地址
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    fn name(&self) -> &str {
        "redis"
    }

    async fn get(&self, key: &str) -> FaqResult<Option<String>> {
        let mut conn = self.connection.clone();
        let cached: Option<String> = conn.get(key).await?;
        Ok(cached)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> FaqResult<()> {
        let mut conn = self.connection.clone();
        // SETEX 不接受 0 秒
        let seconds = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> FaqResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
