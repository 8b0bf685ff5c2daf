//! 内容指纹（SHA-256，十六进制编码）

use sha2::{Digest, Sha256};

/// 通知中展示的指纹前缀长度
pub const PREVIEW_LEN: usize = 16;

/// 计算文本的 SHA-256 指纹（UTF-8 字节）
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// 指纹预览：前 16 个字符 + `...`
pub fn preview(hash: &str) -> String {
    let head: String = hash.chars().take(PREVIEW_LEN).collect();
    format!("{}...", head)
}
