use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{IoResultExt, Result};
use crate::models::{OrganizationDirectory, ProjectDirectory};

/// 列出指定目录下的直接子目录（跳过隐藏目录），保持文件系统的枚举顺序
///
/// 名称只用于显示和匹配，可能经过有损转换；路径取自目录项本身，
/// 非 UTF-8 的目录名也能原样访问。
pub async fn list_subdirectories(path: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut subdirectories = Vec::new();
    let mut entries = fs::read_dir(path).await.with_path(path)?;

    while let Some(entry) = entries.next_entry().await.with_path(path)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let entry_path = entry.path();
        let file_type = entry.file_type().await.with_path(&entry_path)?;
        if file_type.is_dir() {
            subdirectories.push((name, entry_path));
        }
    }

    Ok(subdirectories)
}

/// 只要子目录名
pub async fn list_directory_names(path: &Path) -> Result<Vec<String>> {
    Ok(list_subdirectories(path)
        .await?
        .into_iter()
        .map(|(name, _)| name)
        .collect())
}

/// 项目根目录下的所有组织
pub async fn list_organizations(root: &Path) -> Result<Vec<OrganizationDirectory>> {
    Ok(list_subdirectories(root)
        .await?
        .into_iter()
        .map(|(name, path)| OrganizationDirectory::new(name, path))
        .collect())
}

/// 组织目录下的所有项目（只看一层）
pub async fn list_projects(organization: &OrganizationDirectory) -> Result<Vec<ProjectDirectory>> {
    Ok(list_subdirectories(&organization.path)
        .await?
        .into_iter()
        .map(|(name, path)| ProjectDirectory::new(organization, name, path))
        .collect())
}
