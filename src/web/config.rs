//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use crate::env::{self, EnvError, EnvResult, EnvVar};
use crate::faq::FaqServiceConfig;
use crate::redis_cache::RedisCacheConfig;
use crate::storage::{MemoryCacheConfig, MongoConfig};
use crate::translation::TranslatorConfig;

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// MongoDB 配置，未设置时使用进程内存储
    pub mongo_config: Option<MongoConfig>,
    /// Redis 配置，未设置时使用进程内缓存
    pub redis_config: Option<RedisCacheConfig>,
    /// 进程内缓存配置（Redis 不可用时的回退）
    pub memory_cache_config: MemoryCacheConfig,
    /// 翻译后端配置
    pub translator_config: TranslatorConfig,
    /// FAQ 服务配置
    pub service_config: FaqServiceConfig,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            bind_addr: env::web::BindAddress::get()?,
            port: env::web::Port::get()?,
            mongo_config: Some(MongoConfig::from_env()?),
            redis_config: Some(RedisCacheConfig::from_env()?),
            memory_cache_config: MemoryCacheConfig::from_env()?,
            translator_config: TranslatorConfig::from_env()?,
            service_config: FaqServiceConfig::from_env()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        // 验证绑定地址
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: env::web::BindAddress::NAME.to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        // 验证端口范围
        if self.port == 0 {
            return Err(EnvError {
                variable: env::web::Port::NAME.to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.service_config.cache_ttl.is_zero() {
            return Err(EnvError {
                variable: env::cache::Ttl::NAME.to_string(),
                message: "TTL must be greater than 0".to_string(),
            });
        }

        // 验证MongoDB配置
        if let Some(ref mongo_config) = self.mongo_config {
            mongo_config.validate()?;
        }

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load web config from environment: {}. Using defaults.", e);
            Self {
                bind_addr: "127.0.0.1".to_string(),
                port: 7080,
                mongo_config: Some(MongoConfig::default()),
                redis_config: Some(RedisCacheConfig::default()),
                memory_cache_config: MemoryCacheConfig::default(),
                translator_config: TranslatorConfig::default(),
                service_config: FaqServiceConfig::default(),
            }
        })
    }
}
