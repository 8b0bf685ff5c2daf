//! 变更通知

pub mod discord;

pub use discord::{build_payload, DiscordNotifier};

use crate::error::NotifyError;

/// 一次检测到的变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub site: String,
    pub url: String,
    pub old_hash: String,
    pub new_hash: String,
}

/// 通知投递；失败只记录，不影响状态写入
pub trait Notifier {
    fn notify(&self, change: &ChangeEvent) -> Result<(), NotifyError>;
}
