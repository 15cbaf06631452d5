// crates/lh_config/src/error.rs

//! 配置层错误类型
//!
//! 只在运行开始加载配置时产生；时间步计算中不会出现。

use std::path::PathBuf;

use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("无法读取配置文件 {path:?}: {source}")]
    Read {
        /// 文件路径
        path: PathBuf,
        /// 底层 IO 错误
        source: std::io::Error,
    },

    /// 写出配置文件失败
    #[error("无法写出配置文件 {path:?}: {source}")]
    Write {
        /// 文件路径
        path: PathBuf,
        /// 底层 IO 错误
        source: std::io::Error,
    },

    /// JSON 格式错误
    #[error("配置 JSON 无法解析: {0}")]
    Json(#[from] serde_json::Error),

    /// 选项或参数取值不合理
    #[error("{key} = {value} 无效: {reason}")]
    InvalidValue {
        /// 配置键，如 `options.snow_bands`
        key: &'static str,
        /// 实际取值
        value: String,
        /// 原因
        reason: String,
    },
}

impl ConfigError {
    /// 构造无效值错误
    pub fn invalid(key: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 出错的配置键（仅无效值错误）
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::InvalidValue { key, .. } => Some(key),
            _ => None,
        }
    }
}
