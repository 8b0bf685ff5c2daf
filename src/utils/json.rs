//! JSON 工具

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::{read_file, write_file_atomic};

/// 读取 JSON 文件
pub fn read_json<T>(path: &std::path::Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = read_file(path)?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

/// 写入 JSON 文件（格式化，原子替换）
pub fn write_json<T>(path: &std::path::Path, data: &T) -> Result<()>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;

    write_file_atomic(path, &json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))
}

/// 尝试读取 JSON 文件，文件缺失或内容损坏时返回 None
pub fn try_read_json<T>(path: &std::path::Path) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    read_json(path).ok()
}
