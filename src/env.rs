//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量管理。每个变量实现 [`EnvVar`]，
//! 拥有名称、默认值、说明和解析规则。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "FAQ_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.trim().to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 默认语言
    pub struct DefaultLanguage;
    impl EnvVar<String> for DefaultLanguage {
        const NAME: &'static str = "FAQ_DEFAULT_LANGUAGE";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("en".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Language used when a request names none";

        fn parse(value: &str) -> EnvResult<String> {
            parse_language_code(value, Self::NAME)
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// API URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "FAQ_TRANSLATION_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("https://translate.googleapis.com".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Translation API base URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim().trim_end_matches('/');
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// 请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "FAQ_TRANSLATION_TIMEOUT_SECONDS";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(10));
        const DESCRIPTION: &'static str = "Translation request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_seconds(value, Self::NAME, 1, 300)
        }
    }
}

/// 缓存相关环境变量
pub mod cache {
    use super::*;

    /// 缓存TTL
    pub struct Ttl;
    impl EnvVar<Duration> for Ttl {
        const NAME: &'static str = "FAQ_CACHE_TTL_SECONDS";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(3600));
        const DESCRIPTION: &'static str = "Lifetime of a cached FAQ list in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_seconds(value, Self::NAME, 1, 86400 * 7)
        }
    }

    /// 缓存键前缀
    pub struct KeyPrefix;
    impl EnvVar<String> for KeyPrefix {
        const NAME: &'static str = "FAQ_CACHE_KEY_PREFIX";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("faqs:".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Prefix of per-language cache keys";

        fn parse(value: &str) -> EnvResult<String> {
            let prefix = value.trim();
            if prefix.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Key prefix cannot be empty".to_string(),
                });
            }
            Ok(prefix.to_string())
        }
    }

    /// 本地缓存容量
    pub struct LocalCacheSize;
    impl EnvVar<usize> for LocalCacheSize {
        const NAME: &'static str = "FAQ_CACHE_LOCAL_SIZE";
        const DEFAULT: Option<usize> = Some(256);
        const DESCRIPTION: &'static str = "In-memory cache capacity (number of language keys)";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 100000)
        }
    }
}

/// Redis 相关环境变量
pub mod redis {
    use super::*;

    /// Redis 连接地址
    pub struct Url;
    impl EnvVar<String> for Url {
        const NAME: &'static str = "FAQ_REDIS_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("redis://127.0.0.1:6379".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Redis connection URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("redis://") || url.starts_with("rediss://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Redis URL must start with redis:// or rediss://".to_string(),
                })
            }
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "FAQ_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "FAQ_WEB_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }
}

/// MongoDB 相关环境变量
pub mod mongodb {
    use super::*;

    /// MongoDB连接字符串
    pub struct ConnectionString;
    impl EnvVar<String> for ConnectionString {
        const NAME: &'static str = "FAQ_MONGODB_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("mongodb://localhost:27017".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB connection string";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "MongoDB URL must start with mongodb:// or mongodb+srv://"
                        .to_string(),
                })
            }
        }
    }

    /// 数据库名称
    pub struct DatabaseName;
    impl EnvVar<String> for DatabaseName {
        const NAME: &'static str = "FAQ_MONGODB_DATABASE";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("faqs".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB database name";

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME, "Database name")
        }
    }

    /// 集合名称
    pub struct CollectionName;
    impl EnvVar<String> for CollectionName {
        const NAME: &'static str = "FAQ_MONGODB_COLLECTION";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("faqs".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB collection name";

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME, "Collection name")
        }
    }
}

/// 辅助函数
fn parse_non_empty(value: &str, var_name: &str, what: &str) -> EnvResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("{} cannot be empty", what),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_language_code(value: &str, var_name: &str) -> EnvResult<String> {
    let lang = value.trim().to_lowercase();
    // ISO 639-1 或带地区后缀的代码，例如 zh-cn
    let valid = !lang.is_empty()
        && lang.len() <= 10
        && lang.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
    if valid {
        Ok(lang)
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid language code '{}'", value),
        })
    }
}

fn parse_seconds(value: &str, var_name: &str, min: u64, max: u64) -> EnvResult<Duration> {
    let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid number of seconds".to_string(),
    })?;

    if seconds < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", seconds, min),
        });
    }

    if seconds > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", seconds, max),
        });
    }

    Ok(Duration::from_secs(seconds))
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&format!("- `{}`: {}\n", core::LogLevel::NAME, core::LogLevel::DESCRIPTION));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        core::DefaultLanguage::NAME,
        core::DefaultLanguage::DESCRIPTION
    ));

    docs.push_str("\n## Translation Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        translation::ApiUrl::NAME,
        translation::ApiUrl::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        translation::Timeout::NAME,
        translation::Timeout::DESCRIPTION,
        translation::Timeout::DEFAULT
    ));

    docs.push_str("\n## Cache Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        cache::Ttl::NAME,
        cache::Ttl::DESCRIPTION,
        cache::Ttl::DEFAULT
    ));
    docs.push_str(&format!("- `{}`: {}\n", cache::KeyPrefix::NAME, cache::KeyPrefix::DESCRIPTION));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        cache::LocalCacheSize::NAME,
        cache::LocalCacheSize::DESCRIPTION,
        cache::LocalCacheSize::DEFAULT
    ));
    docs.push_str(&format!("- `{}`: {}\n", redis::Url::NAME, redis::Url::DESCRIPTION));

    docs.push_str("\n## Web Server Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        web::BindAddress::NAME,
        web::BindAddress::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        web::Port::NAME,
        web::Port::DESCRIPTION,
        web::Port::DEFAULT
    ));

    docs.push_str("\n## MongoDB Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        mongodb::ConnectionString::NAME,
        mongodb::ConnectionString::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        mongodb::DatabaseName::NAME,
        mongodb::DatabaseName::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        mongodb::CollectionName::NAME,
        mongodb::CollectionName::DESCRIPTION
    ));

    docs
}
