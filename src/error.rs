//! 错误类型
//!
//! 致命错误（配置、Webhook）在启动阶段返回；
//! 单站点错误（抓取、通知、状态写入）只影响当前站点。

use std::path::PathBuf;
use thiserror::Error;

/// 启动配置错误（致命）
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("DISCORD_WEBHOOK_URL environment variable is not set")]
    WebhookNotSet,

    #[error("Failed to create state directory {}: {source}", path.display())]
    StateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 页面抓取错误（非致命）
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid selector `{0}`")]
    Selector(String),
}

/// Webhook 通知错误（非致命）
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook error {status}: {body}")]
    Status { status: u16, body: String },
}

/// 状态存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to persist state for `{site}`: {reason}")]
    Write { site: String, reason: String },
}
