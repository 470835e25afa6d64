//! 进程内 FAQ 存储
//!
//! 用于本地开发、测试以及 MongoDB 不可用时的回退。

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::FaqStore;
use crate::error::FaqResult;
use crate::faq::types::{FaqChanges, FaqRecord, NewFaq};

/// 进程内 FAQ 存储，按插入顺序保存记录
#[derive(Default)]
pub struct MemoryFaqStore {
    records: RwLock<Vec<FaqRecord>>,
}

impl MemoryFaqStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前记录数量
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl FaqStore for MemoryFaqStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create(&self, faq: NewFaq) -> FaqResult<FaqRecord> {
        let record = FaqRecord {
            id: Uuid::new_v4().simple().to_string(),
            question: faq.question,
            answer: faq.answer,
            translations: faq.translations,
        };

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> FaqResult<Vec<FaqRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_and_update(
        &self,
        id: &str,
        changes: FaqChanges,
    ) -> FaqResult<Option<FaqRecord>> {
        let mut records = self.records.write().await;

        Ok(records.iter_mut().find(|record| record.id == id).map(|record| {
            record.question = changes.question;
            record.answer = changes.answer;
            record.translations = changes.translations;
            record.clone()
        }))
    }

    async fn find_and_delete(&self, id: &str) -> FaqResult<()> {
        self.records.write().await.retain(|record| record.id != id);
        Ok(())
    }
}
