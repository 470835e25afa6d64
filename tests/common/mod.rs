// 集成测试公共模块
//
// 提供测试替身和共享的服务构建函数

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use polyglot_faq::error::{FaqError, FaqResult};
use polyglot_faq::faq::{FaqChanges, FaqRecord, FaqService, FaqServiceConfig, NewFaq};
use polyglot_faq::storage::{
    CacheStore, FaqStore, MemoryCacheConfig, MemoryCacheStore, MemoryFaqStore,
};
use polyglot_faq::translation::Translator;

/// 确定性的翻译替身：`"[hi] 原文"`
#[derive(Default)]
pub struct FakeTranslator {
    pub calls: AtomicUsize,
}

impl FakeTranslator {
    pub fn expected(text: &str, lang: &str) -> String {
        format!("[{}] {}", lang, text)
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> FaqResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::expected(text, target_lang))
    }
}

/// 总是失败的翻译替身
pub struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn translate(&self, _text: &str, _target_lang: &str) -> FaqResult<String> {
        Err(FaqError::Translation("provider unavailable".to_string()))
    }
}

/// 记录调用次数的持久化存储包装，可注入故障
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryFaqStore,
    pub creates: AtomicUsize,
    pub find_alls: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    pub fail: AtomicBool,
}

impl CountingStore {
    pub fn total_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
            + self.find_alls.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_alls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> FaqResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(FaqError::Store("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FaqStore for CountingStore {
    fn name(&self) -> &str {
        "counting"
    }

    async fn create(&self, faq: NewFaq) -> FaqResult<FaqRecord> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.create(faq).await
    }

    async fn find_all(&self) -> FaqResult<Vec<FaqRecord>> {
        self.find_alls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_all().await
    }

    async fn find_and_update(
        &self,
        id: &str,
        changes: FaqChanges,
    ) -> FaqResult<Option<FaqRecord>> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_and_update(id, changes).await
    }

    async fn find_and_delete(&self, id: &str) -> FaqResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_and_delete(id).await
    }
}

/// 可注入故障的缓存包装
pub struct FlakyCache {
    pub inner: MemoryCacheStore,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_delete: AtomicBool,
    pub deletes: AtomicUsize,
}

impl Default for FlakyCache {
    fn default() -> Self {
        Self {
            inner: memory_cache(),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            deletes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CacheStore for FlakyCache {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn get(&self, key: &str) -> FaqResult<Option<String>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(FaqError::Cache("GET timed out".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> FaqResult<()> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(FaqError::Cache("SETEX refused".to_string()));
        }
        self.inner.set_with_ttl(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> FaqResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(FaqError::Cache("DEL refused".to_string()));
        }
        self.inner.delete(key).await
    }
}

pub fn memory_cache() -> MemoryCacheStore {
    MemoryCacheStore::new(MemoryCacheConfig { capacity: 64 })
}

/// 测试环境：服务及其全部协作方
pub struct TestEnvironment {
    pub service: Arc<FaqService>,
    pub translator: Arc<FakeTranslator>,
    pub store: Arc<CountingStore>,
    pub cache: Arc<FlakyCache>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let translator = Arc::new(FakeTranslator::default());
        let store = Arc::new(CountingStore::default());
        let cache = Arc::new(FlakyCache::default());

        let service = Arc::new(FaqService::new(
            translator.clone(),
            store.clone(),
            cache.clone(),
            FaqServiceConfig::default(),
        ));

        Self {
            service,
            translator,
            store,
            cache,
        }
    }

    /// 直接读取缓存中的原始内容
    pub async fn cached(&self, lang: &str) -> Option<String> {
        self.cache
            .inner
            .get(&format!("faqs:{}", lang))
            .await
            .expect("memory cache never fails")
    }
}
