use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::defaults::DefaultConfig;
use crate::error::RootError;

/// 覆盖项目根目录的环境变量
pub const PROJECT_ROOT_ENV: &str = "PROJECT_ROOT_DIRECTORY";

/// 覆盖工作区根目录的环境变量
pub const WORKSPACE_ROOT_ENV: &str = "WORKSPACE_ROOT_DIRECTORY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 根目录配置
    pub roots: RootsConfig,

    /// 忽略配置
    pub ignore: IgnoreConfig,

    /// 扫描配置
    pub scan: ScanConfig,

    /// 显示配置
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RootsConfig {
    /// 项目根目录（其直接子目录为组织）
    pub project_root: Option<String>,

    /// 工作区根目录（与项目根目录结构相同）
    pub workspace_root: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// 扫描时总是跳过的文件名
    pub file_names: HashSet<String>,

    /// `scan` 命令额外忽略的路径
    pub paths: HashSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 按扩展名搜索时同时扫描的项目数
    pub concurrent_scans: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 名称列与路径列之间的空格数
    pub column_gap: usize,

    /// 默认输出格式
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 文本报告
    #[default]
    Table,
    /// JSON 格式
    Json,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file_names: DefaultConfig::default_ignored_file_names(),
            paths: HashSet::new(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrent_scans: DefaultConfig::default_concurrent_scans(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            column_gap: DefaultConfig::default_column_gap(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// 获取默认配置文件路径
    pub fn default_config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("无法找到配置目录"))?;
        path.push("project-organizer");
        path.push("config.toml");
        Ok(path)
    }

    /// 加载配置，如果文件不存在则创建默认配置
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            let config = Self::default();
            config.save_to_file(path)?;
            tracing::info!("已创建默认配置: {}", path.display());
            Ok(config)
        }
    }

    /// 项目根目录：环境变量优先，其次是配置文件
    pub fn project_root(&self) -> Result<PathBuf, RootError> {
        resolve_root(
            std::env::var(PROJECT_ROOT_ENV).ok(),
            self.roots.project_root.as_deref(),
            PROJECT_ROOT_ENV,
            "project",
        )
    }

    /// 工作区根目录，与项目根目录分别校验
    pub fn workspace_root(&self) -> Result<PathBuf, RootError> {
        resolve_root(
            std::env::var(WORKSPACE_ROOT_ENV).ok(),
            self.roots.workspace_root.as_deref(),
            WORKSPACE_ROOT_ENV,
            "workspace",
        )
    }

    /// 添加忽略的文件名，已存在时返回 false
    pub fn add_ignored_file_name(&mut self, name: &str) -> bool {
        self.ignore.file_names.insert(name.to_string())
    }

    /// 移除忽略的文件名，不存在时返回 false
    pub fn remove_ignored_file_name(&mut self, name: &str) -> bool {
        self.ignore.file_names.remove(name)
    }
}

/// 解析并校验一个根目录
///
/// 空字符串视同未设置；`~/` 开头的路径展开到用户主目录。
pub fn resolve_root(
    env_value: Option<String>,
    configured: Option<&str>,
    variable: &'static str,
    kind: &'static str,
) -> Result<PathBuf, RootError> {
    let raw = env_value
        .filter(|value| !value.is_empty())
        .or_else(|| configured.filter(|value| !value.is_empty()).map(str::to_string))
        .ok_or(RootError::NotConfigured { variable })?;

    let path = expand_home(&raw);
    match std::fs::metadata(&path) {
        Ok(metadata) if metadata.is_dir() => Ok(path),
        Ok(_) => Err(RootError::NotADirectory { kind, path }),
        Err(_) => Err(RootError::Missing { kind, path }),
    }
}

fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_value_wins_over_config() {
        let from_env = tempdir().unwrap();
        let from_config = tempdir().unwrap();

        let root = resolve_root(
            Some(from_env.path().display().to_string()),
            Some(&from_config.path().display().to_string()),
            PROJECT_ROOT_ENV,
            "project",
        )
        .unwrap();
        assert_eq!(root, from_env.path());
    }

    #[test]
    fn test_empty_env_falls_back_to_config() {
        let from_config = tempdir().unwrap();
        let root = resolve_root(
            Some(String::new()),
            Some(&from_config.path().display().to_string()),
            PROJECT_ROOT_ENV,
            "project",
        )
        .unwrap();
        assert_eq!(root, from_config.path());
    }

    #[test]
    fn test_unset_root_is_reported() {
        let err = resolve_root(None, None, WORKSPACE_ROOT_ENV, "workspace").unwrap_err();
        assert!(matches!(
            err,
            RootError::NotConfigured { variable: WORKSPACE_ROOT_ENV }
        ));
    }

    #[test]
    fn test_missing_and_non_directory_roots() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = resolve_root(
            Some(missing.display().to_string()),
            None,
            PROJECT_ROOT_ENV,
            "project",
        )
        .unwrap_err();
        assert!(matches!(err, RootError::Missing { .. }));

        let err = resolve_root(
            Some(file.display().to_string()),
            None,
            PROJECT_ROOT_ENV,
            "project",
        )
        .unwrap_err();
        assert!(matches!(err, RootError::NotADirectory { .. }));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.roots.project_root = Some("/srv/projects".to_string());
        config.add_ignored_file_name("desktop.ini");
        config.display.format = OutputFormat::Json;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.roots.project_root.as_deref(), Some("/srv/projects"));
        assert!(loaded.ignore.file_names.contains("desktop.ini"));
        assert!(loaded.ignore.file_names.contains(".DS_Store"));
        assert_eq!(loaded.display.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[roots]\nproject_root = \"/p\"\n").unwrap();
        assert_eq!(config.roots.project_root.as_deref(), Some("/p"));
        assert_eq!(config.display.column_gap, 8);
        assert!(config.ignore.file_names.contains(".DS_Store"));
    }

    #[test]
    fn test_ignored_file_name_updates() {
        let mut config = Config::default();
        assert!(!config.add_ignored_file_name(".DS_Store"));
        assert!(config.remove_ignored_file_name(".DS_Store"));
        assert!(!config.remove_ignored_file_name(".DS_Store"));
    }
}
