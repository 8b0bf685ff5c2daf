//! 状态数据模型
//!
//! 对应 `<state_dir>/<key>.json`

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 单个站点最近一次检查的快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteState {
    pub hash: String,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_checked: DateTime<Utc>,

    pub url: String,

    /// 仅在检测到变更的那次运行写入
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_hash: Option<String>,
}

impl SiteState {
    pub fn observed(hash: impl Into<String>, url: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            hash: hash.into(),
            last_checked: at,
            url: url.into(),
            previous_hash: None,
        }
    }

    pub fn with_previous(mut self, previous_hash: impl Into<String>) -> Self {
        self.previous_hash = Some(previous_hash.into());
        self
    }
}

/// 解析时间戳：RFC 3339，或不带时区的 ISO-8601（按 UTC 处理）
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
