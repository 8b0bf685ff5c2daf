//! 文件系统工具

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 安全读取文件内容
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// 原子写入文件
///
/// 先写入同目录下的临时文件，再 rename 覆盖目标文件。
/// 进程在写入途中崩溃时，目标文件保持旧内容。
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    // 确保父目录存在
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp = temp_path_for(path);
    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write temp file: {}", tmp.display()))?;

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to replace file: {}", path.display()));
    }

    Ok(())
}

/// 创建目录（包括父目录）
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// 临时文件名：`.<name>.tmp`，与目标文件同目录（rename 不跨文件系统）
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parent() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("nested/dir/state.json");

        write_file_atomic(&file_path, "hello").unwrap();

        assert_eq!(read_file(&file_path).unwrap(), "hello");
    }

    #[test]
    fn test_write_atomic_overwrites_and_leaves_no_temp() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("state.json");

        write_file_atomic(&file_path, "a much longer first version").unwrap();
        write_file_atomic(&file_path, "short").unwrap();

        assert_eq!(read_file(&file_path).unwrap(), "short");

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_read_missing_has_context() {
        let temp = TempDir::new().unwrap();
        let err = read_file(&temp.path().join("missing.txt")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read file"));
    }
}
