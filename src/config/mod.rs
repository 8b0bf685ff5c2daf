//! 配置模块
//!
//! - `sites`: 站点列表（`config/sites.json`）
//! - `settings`: 进程级配置（Webhook、配置路径、状态目录）

pub mod settings;
pub mod sites;

// 重导出
pub use settings::*;
pub use sites::*;
