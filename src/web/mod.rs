//! Web 服务器模块
//!
//! 将 FAQ 服务以 HTTP API 形式提供，并负责根据配置装配持久化存储、缓存与翻译后端

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::error::{FaqError, FaqResult};
use crate::faq::FaqService;
use crate::redis_cache::RedisCache;
use crate::storage::{CacheStore, FaqStore, MemoryCacheStore, MemoryFaqStore, MongoFaqStore};
use crate::translation::{GoogleTranslator, Translator};

/// 进程内缓存的过期清理周期
const MEMORY_CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig) -> Self {
        Self { config }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> FaqResult<()> {
        self.config.validate()?;

        let app_state = Arc::new(self.build_state().await?);
        let app = create_router(app_state);

        let listen_address = self.config.listen_address();
        let listener = tokio::net::TcpListener::bind(&listen_address)
            .await
            .map_err(|e| FaqError::Config(format!("Failed to bind server: {}", e)))?;

        tracing::info!("Web server starting at http://{}", listen_address);

        axum::serve(listener, app)
            .await
            .map_err(|e| FaqError::Config(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// 按配置装配 FAQ 服务
    pub async fn build_state(&self) -> FaqResult<AppState> {
        let store = self.connect_store().await;
        let cache = self.connect_cache().await;
        let translator: Arc<dyn Translator> =
            Arc::new(GoogleTranslator::new(self.config.translator_config.clone())?);

        let faq_service = FaqService::new(
            translator,
            store,
            cache,
            self.config.service_config.clone(),
        );

        Ok(AppState::new(Arc::new(faq_service)))
    }

    async fn connect_store(&self) -> Arc<dyn FaqStore> {
        let Some(ref mongo_config) = self.config.mongo_config else {
            tracing::info!("未配置 MongoDB，使用进程内存储");
            return Arc::new(MemoryFaqStore::new());
        };

        match MongoFaqStore::connect(mongo_config).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!("MongoDB 连接失败: {}", e);
                tracing::warn!("继续运行，但数据仅保存在进程内");
                Arc::new(MemoryFaqStore::new())
            }
        }
    }

    async fn connect_cache(&self) -> Arc<dyn CacheStore> {
        let memory_cache = || {
            let cache = MemoryCacheStore::new(self.config.memory_cache_config.clone());
            cache.spawn_cleanup(MEMORY_CACHE_SWEEP_INTERVAL);
            cache
        };

        let Some(ref redis_config) = self.config.redis_config else {
            tracing::info!("未配置 Redis 缓存，使用进程内缓存");
            return Arc::new(memory_cache());
        };

        let connected = match RedisCache::connect(redis_config.clone()).await {
            Ok(cache) => cache.test_connection().await.map(|_| cache),
            Err(e) => Err(e),
        };

        match connected {
            Ok(cache) => {
                tracing::info!("Redis 缓存连接成功: {}", cache.url());
                Arc::new(cache)
            }
            Err(e) => {
                tracing::warn!("Redis 连接失败: {}", e);
                tracing::warn!("继续运行，使用进程内缓存");
                Arc::new(memory_cache())
            }
        }
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>) -> Router {
    create_routes()
        .with_state(app_state)
        // 添加CORS支持
        .layer(CorsLayer::permissive())
}
