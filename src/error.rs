//! FAQ 服务统一错误处理
//!
//! 区分客户端错误（缺少ID、输入无效、记录不存在）与协作方故障
//! （翻译服务、持久化存储、缓存存储）。后者一律以内部错误上报。

use thiserror::Error;

/// FAQ 服务错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaqError {
    /// 更新/删除请求缺少 FAQ ID
    #[error("FAQ ID is required")]
    MissingId,

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 记录不存在
    #[error("FAQ 不存在: {0}")]
    NotFound(String),

    /// 翻译服务错误
    #[error("翻译服务错误: {0}")]
    Translation(String),

    /// 持久化存储错误
    #[error("存储错误: {0}")]
    Store(String),

    /// 缓存存储错误
    #[error("缓存错误: {0}")]
    Cache(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl FaqError {
    /// 是否为客户端错误（不会触发任何存储访问）
    pub fn is_client_error(&self) -> bool {
        matches!(self, FaqError::MissingId | FaqError::InvalidInput(_))
    }

    /// 是否为协作方故障
    pub fn is_internal(&self) -> bool {
        !self.is_client_error() && !matches!(self, FaqError::NotFound(_))
    }

    /// 对应的 HTTP 状态码
    #[cfg(feature = "web")]
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            FaqError::MissingId | FaqError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FaqError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for FaqError {
    fn from(err: serde_json::Error) -> Self {
        FaqError::Serialization(err.to_string())
    }
}

impl From<crate::env::EnvError> for FaqError {
    fn from(err: crate::env::EnvError) -> Self {
        FaqError::Config(err.to_string())
    }
}

#[cfg(feature = "web")]
impl From<mongodb::error::Error> for FaqError {
    fn from(err: mongodb::error::Error) -> Self {
        FaqError::Store(err.to_string())
    }
}

#[cfg(feature = "web")]
impl From<redis::RedisError> for FaqError {
    fn from(err: redis::RedisError) -> Self {
        FaqError::Cache(err.to_string())
    }
}

#[cfg(feature = "web")]
impl From<reqwest::Error> for FaqError {
    fn from(err: reqwest::Error) -> Self {
        FaqError::Translation(err.to_string())
    }
}

/// FAQ 服务结果类型
pub type FaqResult<T> = Result<T, FaqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(FaqError::MissingId.is_client_error());
        assert!(FaqError::InvalidInput("empty".to_string()).is_client_error());
        assert!(!FaqError::NotFound("abc".to_string()).is_client_error());
        assert!(!FaqError::NotFound("abc".to_string()).is_internal());
        assert!(FaqError::Translation("down".to_string()).is_internal());
        assert!(FaqError::Cache("refused".to_string()).is_internal());
    }

    #[test]
    fn test_missing_id_message() {
        assert_eq!(FaqError::MissingId.to_string(), "FAQ ID is required");
    }

    #[cfg(feature = "web")]
    #[test]
    fn test_status_code_mapping() {
        use axum::http::StatusCode;

        assert_eq!(FaqError::MissingId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            FaqError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            FaqError::Store("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
