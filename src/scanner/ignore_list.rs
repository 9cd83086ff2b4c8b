use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// 忽略规则：调用方给出的路径列表 + 固定忽略的文件名
///
/// 路径按完整的路径段比较，`/a/b` 只匹配 `/a/b` 及其下级，不匹配 `/a/bc`。
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    /// 规范化后的忽略路径
    paths: Vec<PathBuf>,

    /// 任何位置都跳过的文件名（如 `.DS_Store`）
    file_names: HashSet<String>,
}

impl IgnoreList {
    pub fn new<I, P>(paths: I, file_names: HashSet<String>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(|path| normalize_path(path.as_ref()))
                .collect(),
            file_names,
        }
    }

    /// 只包含固定文件名，不忽略任何路径
    pub fn names_only(file_names: HashSet<String>) -> Self {
        Self::new(Vec::<PathBuf>::new(), file_names)
    }

    /// 路径本身或其任何祖先在忽略列表中
    pub fn is_ignored_path(&self, path: &Path) -> bool {
        if self.paths.is_empty() {
            return false;
        }
        let path = normalize_path(path);
        self.paths.iter().any(|ignored| path.starts_with(ignored))
    }

    /// 文件名在固定忽略集合中
    pub fn is_ignored_name(&self, name: &str) -> bool {
        self.file_names.contains(name)
    }
}

/// 转成绝对路径并按字面折叠 `.` 和 `..`，不访问文件系统
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
