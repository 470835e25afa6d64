//! # MongoDB FAQ 存储
//!
//! 每条 FAQ 保存为一个文档，`_id` 为 ObjectId，`translations` 为以语言代码为键的子文档。

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{options::ReturnDocument, Client, Collection};
use serde::{Deserialize, Serialize};

use super::FaqStore;
use crate::env::{self, EnvError, EnvResult, EnvVar};
use crate::error::{FaqError, FaqResult};
use crate::faq::types::{FaqChanges, FaqRecord, NewFaq, TranslationMap};

/// MongoDB 配置
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// MongoDB 连接字符串
    pub connection_string: String,
    /// 数据库名称
    pub database_name: String,
    /// 集合名称
    pub collection_name: String,
}

impl MongoConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            connection_string: env::mongodb::ConnectionString::get()?,
            database_name: env::mongodb::DatabaseName::get()?,
            collection_name: env::mongodb::CollectionName::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.connection_string.is_empty() {
            return Err(EnvError {
                variable: env::mongodb::ConnectionString::NAME.to_string(),
                message: "Connection string cannot be empty".to_string(),
            });
        }

        if self.database_name.is_empty() {
            return Err(EnvError {
                variable: env::mongodb::DatabaseName::NAME.to_string(),
                message: "Database name cannot be empty".to_string(),
            });
        }

        if self.collection_name.is_empty() {
            return Err(EnvError {
                variable: env::mongodb::CollectionName::NAME.to_string(),
                message: "Collection name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load MongoDB config from environment: {}. Using defaults.", e);
            Self {
                connection_string: "mongodb://localhost:27017".to_string(),
                database_name: "faqs".to_string(),
                collection_name: "faqs".to_string(),
            }
        })
    }
}

/// MongoDB 中存储的 FAQ 文档
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FaqDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 原始问题
    pub question: String,
    /// 原始答案
    pub answer: String,
    /// 各语言翻译
    #[serde(default)]
    pub translations: TranslationMap,
}

impl FaqDocument {
    fn into_record(self) -> FaqResult<FaqRecord> {
        let id = self
            .id
            .ok_or_else(|| FaqError::Store("文档缺少 _id 字段".to_string()))?;

        Ok(FaqRecord {
            id: id.to_hex(),
            question: self.question,
            answer: self.answer,
            translations: self.translations,
        })
    }
}

/// 基于 MongoDB 的 FAQ 存储
#[derive(Clone)]
pub struct MongoFaqStore {
    collection: Collection<FaqDocument>,
}

impl MongoFaqStore {
    /// 使用已有集合创建存储
    pub fn new(collection: Collection<FaqDocument>) -> Self {
        Self { collection }
    }

    /// 按配置连接 MongoDB
    pub async fn connect(config: &MongoConfig) -> FaqResult<Self> {
        config.validate()?;

        let client = Client::with_uri_str(&config.connection_string).await?;
        let database = client.database(&config.database_name);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(
            "MongoDB 连接成功: {}/{}",
            config.database_name,
            config.collection_name
        );

        Ok(Self::new(database.collection(&config.collection_name)))
    }

    /// 解析记录 ID；格式不合法的 ID 不可能存在于集合中
    fn parse_id(id: &str) -> Option<ObjectId> {
        ObjectId::parse_str(id).ok()
    }
}

#[async_trait]
impl FaqStore for MongoFaqStore {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn create(&self, faq: NewFaq) -> FaqResult<FaqRecord> {
        let mut document = FaqDocument {
            id: None,
            question: faq.question,
            answer: faq.answer,
            translations: faq.translations,
        };

        let result = self.collection.insert_one(&document).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| FaqError::Store("插入结果缺少 ObjectId".to_string()))?;

        document.id = Some(id);
        document.into_record()
    }

    async fn find_all(&self) -> FaqResult<Vec<FaqRecord>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<FaqDocument> = cursor.try_collect().await?;

        documents.into_iter().map(FaqDocument::into_record).collect()
    }

    async fn find_and_update(
        &self,
        id: &str,
        changes: FaqChanges,
    ) -> FaqResult<Option<FaqRecord>> {
        let Some(object_id) = Self::parse_id(id) else {
            return Ok(None);
        };

        let translations =
            bson::to_bson(&changes.translations).map_err(|e| FaqError::Serialization(e.to_string()))?;
        let update = doc! {
            "$set": {
                "question": changes.question,
                "answer": changes.answer,
                "translations": translations,
            }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        updated.map(FaqDocument::into_record).transpose()
    }

    async fn find_and_delete(&self, id: &str) -> FaqResult<()> {
        let Some(object_id) = Self::parse_id(id) else {
            return Ok(());
        };

        self.collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await?;
        Ok(())
    }
}
