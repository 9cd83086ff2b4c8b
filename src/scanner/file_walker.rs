use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};
use crate::models::FileEntry;
use crate::scanner::IgnoreList;

/// 扫描过程中每产出一个条目就同步通知一次的观察者
///
/// 调用顺序与结果顺序一致（后序），回调返回后遍历才会继续。
pub trait ScanObserver: Send {
    fn on_visit(&mut self, entry: &FileEntry);
}

impl<F> ScanObserver for F
where
    F: FnMut(&FileEntry) + Send,
{
    fn on_visit(&mut self, entry: &FileEntry) {
        self(entry)
    }
}

/// 文件遍历器 - 深度优先、后序地递归扫描目录
///
/// 子孙条目全部产出之后才追加目录自身，因此目录的 `is_empty`
/// 可以直接由它的子树贡献的条目数得出。
#[derive(Debug, Clone, Default)]
pub struct FileWalker {
    /// 任何位置都跳过的文件名
    ignored_file_names: HashSet<String>,

    /// 取消令牌，每进入一个目录前检查一次
    cancel_token: Option<CancellationToken>,
}

impl FileWalker {
    /// 创建新的文件遍历器
    pub fn new(ignored_file_names: HashSet<String>) -> Self {
        Self {
            ignored_file_names,
            cancel_token: None,
        }
    }

    /// 使用配置中的固定忽略文件名
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ignore.file_names.clone())
    }

    /// 绑定取消令牌
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// 扫描 `root` 下的全部条目（不含 `root` 本身）
    ///
    /// 命中 `ignore_paths`（等于或位于其下）的条目既不产出也不进入。
    /// 任何目录读取失败都会使整个扫描失败，不返回部分结果。
    pub async fn scan(
        &self,
        root: &Path,
        ignore_paths: &[PathBuf],
        observer: Option<&mut dyn ScanObserver>,
    ) -> Result<Vec<FileEntry>> {
        let ignore = IgnoreList::new(ignore_paths, self.ignored_file_names.clone());
        let mut noop = |_: &FileEntry| {};
        let observer: &mut dyn ScanObserver = match observer {
            Some(observer) => observer,
            None => &mut noop,
        };

        let mut entries = Vec::new();
        self.walk(root, &ignore, observer, &mut entries).await?;

        tracing::debug!("扫描完成: {} | 条目: {}", root.display(), entries.len());
        Ok(entries)
    }

    /// 子树中是否存在扩展名（含前导点）完全相同的条目，区分大小写
    pub async fn contains_extension(&self, root: &Path, extension: &str) -> Result<bool> {
        let entries = self.scan(root, &[], None).await?;
        Ok(entries
            .iter()
            .any(|entry| entry.extension().as_deref() == Some(extension)))
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel_token {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// 递归遍历单个目录
    fn walk<'a>(
        &'a self,
        dir: &'a Path,
        ignore: &'a IgnoreList,
        observer: &'a mut dyn ScanObserver,
        entries: &'a mut Vec<FileEntry>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.check_cancelled()?;

            let mut read_dir = fs::read_dir(dir).await.with_path(dir)?;

            while let Some(entry) = read_dir.next_entry().await.with_path(dir)? {
                let path = entry.path();

                // 忽略列表在进入目录之前判断，被忽略的子树完全不访问
                if ignore.is_ignored_path(&path) {
                    tracing::debug!("跳过忽略路径: {}", path.display());
                    continue;
                }

                let name = entry.file_name().to_string_lossy().into_owned();
                if ignore.is_ignored_name(&name) {
                    continue;
                }

                let file_type = entry.file_type().await.with_path(&path)?;
                let file_entry = if file_type.is_dir() {
                    let before = entries.len();
                    self.walk(&path, ignore, &mut *observer, entries).await?;
                    let is_empty = entries.len() == before;
                    FileEntry::directory(name, path, is_empty)
                } else {
                    FileEntry::file(name, path)
                };

                observer.on_visit(&file_entry);
                entries.push(file_entry);
            }

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn walker() -> FileWalker {
        FileWalker::new([".DS_Store".to_string()].into_iter().collect())
    }

    fn position(entries: &[FileEntry], path: &Path) -> usize {
        entries
            .iter()
            .position(|e| e.path == path)
            .unwrap_or_else(|| panic!("缺少条目: {}", path.display()))
    }

    #[tokio::test]
    async fn test_post_order_and_is_empty() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/scene.blend"), "data").unwrap();
        fs::create_dir(root.join("empty")).unwrap();
        fs::write(root.join("readme.md"), "hi").unwrap();

        let entries = walker().scan(root, &[], None).await.unwrap();
        assert_eq!(entries.len(), 5);

        // 子孙先于祖先
        let file = position(&entries, &root.join("a/b/scene.blend"));
        let b = position(&entries, &root.join("a/b"));
        let a = position(&entries, &root.join("a"));
        assert!(file < b && b < a);

        let empty = &entries[position(&entries, &root.join("empty"))];
        assert!(empty.is_directory);
        assert!(empty.is_empty);

        let a_entry = &entries[a];
        assert!(a_entry.is_directory);
        assert!(!a_entry.is_empty);

        let readme = &entries[position(&entries, &root.join("readme.md"))];
        assert!(!readme.is_directory);
        assert!(!readme.is_empty);
    }

    #[tokio::test]
    async fn test_ignored_names_are_skipped() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("dir")).unwrap();
        fs::write(root.join("dir/.DS_Store"), "").unwrap();
        fs::write(root.join(".DS_Store"), "").unwrap();

        let entries = walker().scan(root, &[], None).await.unwrap();
        assert_eq!(entries.len(), 1);
        // 只有被忽略的文件时目录视为空
        assert!(entries[0].is_empty);
    }

    #[tokio::test]
    async fn test_ignore_paths_skip_whole_subtree() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("orgA/proj1/deep")).unwrap();
        fs::write(root.join("orgA/proj1/deep/file.txt"), "x").unwrap();
        fs::create_dir_all(root.join("orgA/proj10")).unwrap();

        let mut visited = Vec::new();
        let mut observer = |entry: &FileEntry| visited.push(entry.path.clone());
        let entries = walker()
            .scan(root, &[root.join("orgA/proj1")], Some(&mut observer))
            .await
            .unwrap();

        let ignored = root.join("orgA/proj1");
        assert!(entries.iter().all(|e| !e.path.starts_with(&ignored)));
        assert!(visited.iter().all(|p| !p.starts_with(&ignored)));

        // 前缀相同的兄弟目录不受影响
        let proj10 = &entries[position(&entries, &root.join("orgA/proj10"))];
        assert!(proj10.is_empty);

        // orgA 里只剩被忽略的子树以外的 proj10
        let org = &entries[position(&entries, &root.join("orgA"))];
        assert!(!org.is_empty);
    }

    #[tokio::test]
    async fn test_observer_sees_entries_in_emission_order() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("x/y")).unwrap();
        fs::write(root.join("x/y/1.txt"), "").unwrap();
        fs::write(root.join("x/2.txt"), "").unwrap();

        let mut visited = Vec::new();
        let mut observer = |entry: &FileEntry| visited.push(entry.path.clone());
        let entries = walker()
            .scan(root, &[], Some(&mut observer))
            .await
            .unwrap();

        let emitted: Vec<_> = entries.into_iter().map(|e| e.path).collect();
        assert_eq!(visited, emitted);
    }

    #[tokio::test]
    async fn test_missing_root_fails() {
        let temp_dir = tempdir().unwrap();
        let err = walker()
            .scan(&temp_dir.path().join("missing"), &[], None)
            .await
            .unwrap_err();
        assert!(err.is_io());
    }

    #[tokio::test]
    async fn test_cancelled_scan_returns_error() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("dir")).unwrap();

        let token = CancellationToken::new();
        token.cancel();

        let err = walker()
            .with_cancellation(token)
            .scan(temp_dir.path(), &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn test_contains_extension_is_exact() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("renders")).unwrap();
        fs::write(root.join("renders/Scene.BLEND"), "").unwrap();
        fs::write(root.join("notes.blend1"), "").unwrap();

        let walker = walker();
        assert!(!walker.contains_extension(root, ".blend").await.unwrap());
        assert!(walker.contains_extension(root, ".BLEND").await.unwrap());
        assert!(!walker.contains_extension(root, "BLEND").await.unwrap());
    }
}
