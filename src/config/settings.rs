//! 进程级配置
//!
//! 所有值在启动时解析一次（命令行参数优先，其次环境变量），
//! 显式传入 `Monitor`，不使用全局变量。

use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const WEBHOOK_ENV: &str = "DISCORD_WEBHOOK_URL";
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const STATE_DIR_ENV: &str = "STATE_DIR";

pub const DEFAULT_CONFIG_PATH: &str = "config/sites.json";
pub const DEFAULT_STATE_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    pub webhook_url: String,
    pub config_path: PathBuf,
    pub state_dir: PathBuf,
}

impl MonitorSettings {
    /// 由已解析的值构建配置；Webhook 缺失或为空是致命错误
    pub fn new(
        webhook_url: Option<String>,
        config_path: Option<PathBuf>,
        state_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let webhook_url = webhook_url
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .ok_or(ConfigError::WebhookNotSet)?;

        Ok(Self {
            webhook_url,
            config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            state_dir: state_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
        })
    }

    /// 确保状态目录存在
    pub fn prepare_state_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.state_dir).map_err(|source| ConfigError::StateDir {
            path: self.state_dir.clone(),
            source,
        })
    }
}
