//! 指纹存储
//!
//! 每个站点一个 JSON 文件，文件名由站点名称净化得到。

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::models::SiteState;
use crate::error::StoreError;
use crate::utils::{read_json, try_read_json, write_json};

/// 一次状态查询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Missing,
    /// 记录存在但无法解析，按首次观测处理
    Corrupt { reason: String },
    Found(SiteState),
}

impl Lookup {
    pub fn into_state(self) -> Option<SiteState> {
        match self {
            Lookup::Found(state) => Some(state),
            Lookup::Missing | Lookup::Corrupt { .. } => None,
        }
    }
}

/// 站点 key → 状态记录
pub trait StateStore {
    fn lookup(&self, site: &str) -> Lookup;

    /// 文件缺失或无法解析时返回 None
    fn read(&self, site: &str) -> Option<SiteState> {
        self.lookup(site).into_state()
    }

    /// 完整覆盖该站点的状态
    fn write(&self, site: &str, state: &SiteState) -> Result<(), StoreError>;
}

/// 将站点名称转为文件系统安全的 key：非字母数字字符替换为 `_`
pub fn sanitize_key(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// 基于目录的实现
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, site: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(site)))
    }

    /// 列出目录中所有可解析的状态记录，按 key 排序
    pub fn list(&self) -> Vec<(String, SiteState)> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut records: Vec<(String, SiteState)> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|p| {
                let key = p.file_stem()?.to_string_lossy().into_owned();
                if key.starts_with('.') {
                    return None;
                }
                let state = try_read_json::<SiteState>(&p)?;
                Some((key, state))
            })
            .collect();

        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }
}

impl StateStore for FileStateStore {
    fn lookup(&self, site: &str) -> Lookup {
        let path = self.path_for(site);
        if !path.exists() {
            return Lookup::Missing;
        }

        match read_json(&path) {
            Ok(state) => Lookup::Found(state),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(site, error = %reason, "ignoring unreadable state file");
                Lookup::Corrupt { reason }
            }
        }
    }

    fn write(&self, site: &str, state: &SiteState) -> Result<(), StoreError> {
        write_json(&self.path_for(site), state).map_err(|e| StoreError::Write {
            site: site.to_string(),
            reason: format!("{:#}", e),
        })
    }
}
