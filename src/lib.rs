// Website Change Monitor - Library Root
//
// 单次串行运行：抓取页面 → 计算指纹 → 与上次状态比较 → 变更时通知

pub mod config;
pub mod error;
pub mod fetch;
pub mod fingerprint;
pub mod monitor;
pub mod notify;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// 重新导出常用类型
pub use config::{load_sites, MonitorSettings, SiteConfig};
pub use fingerprint::fingerprint;
pub use monitor::{DefaultMonitor, Monitor, RunSummary, SiteOutcome, SkipReason};
pub use state::{FileStateStore, SiteState, StateStore};
