//! FAQ 服务统计信息
//!
//! 使用原子计数器记录缓存命中、未命中、缓存故障与失效次数，
//! 可在并发请求间共享而无需加锁。

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// 服务统计信息
#[derive(Debug, Default)]
pub struct ServiceStats {
    /// 列表请求命中缓存的次数
    pub cache_hits: AtomicUsize,

    /// 列表请求未命中缓存、回源持久化存储的次数
    pub cache_misses: AtomicUsize,

    /// 缓存读写失败或缓存内容损坏、已降级处理的次数
    pub cache_errors: AtomicUsize,

    /// 写操作触发的缓存失效次数
    pub invalidations: AtomicUsize,
}

impl ServiceStats {
    pub fn inc_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_cache_misses(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_cache_errors(&self) {
        self.cache_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_invalidations(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取统计信息快照
    pub fn snapshot(&self) -> StatsSnapshot {
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.cache_misses.load(Ordering::Relaxed);

        StatsSnapshot {
            cache_hits,
            cache_misses,
            cache_errors: self.cache_errors.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            hit_rate: hit_rate(cache_hits, cache_misses),
        }
    }
}

/// 缓存命中率，无请求时为 0
fn hit_rate(hits: usize, misses: usize) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// 统计信息快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cache_errors: usize,
    pub invalidations: usize,
    /// 列表请求的缓存命中率
    pub hit_rate: f64,
}
