use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 递归扫描时产出的一个条目（文件或目录）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// 文件名
    pub name: String,

    /// 完整路径
    pub path: PathBuf,

    /// 是否为目录
    pub is_directory: bool,

    /// 目录的子树在过滤后没有产出任何条目；文件恒为 false
    pub is_empty: bool,
}

impl FileEntry {
    pub fn file(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            is_directory: false,
            is_empty: false,
        }
    }

    pub fn directory(name: String, path: PathBuf, is_empty: bool) -> Self {
        Self {
            name,
            path,
            is_directory: true,
            is_empty,
        }
    }

    /// 带前导点的扩展名，例如 `.blend`；没有扩展名时返回 None
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
    }
}
