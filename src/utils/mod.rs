//! 工具模块
//!
//! 提供 JSON、文件系统等常用工具函数

pub mod format;
pub mod fs;
pub mod json;

// 重导出
pub use format::*;
pub use fs::*;
pub use json::*;
