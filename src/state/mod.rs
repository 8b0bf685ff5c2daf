//! 状态管理模块
//!
//! 站点指纹快照的数据模型与持久化

pub mod models;
pub mod store;

// 重导出
pub use models::*;
pub use store::*;
