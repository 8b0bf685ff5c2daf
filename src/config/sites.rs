//! 站点列表加载

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// 单个被监控站点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// 站点名称，同时作为状态文件的 key
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    /// 缺失或为 null 时为空字符串，检查阶段跳过
    #[serde(default, deserialize_with = "url_or_empty")]
    pub url: String,

    #[serde(default = "default_selector", deserialize_with = "selector_or_default")]
    pub selector: String,
}

fn default_name() -> String {
    "Unknown".to_string()
}

fn default_selector() -> String {
    "body".to_string()
}

// null 与字段缺失等价
fn name_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_name))
}

fn url_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn selector_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_selector))
}

impl SiteConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            selector: default_selector(),
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// 读取站点列表（JSON 数组）
pub fn load_sites(path: &Path) -> Result<Vec<SiteConfig>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
