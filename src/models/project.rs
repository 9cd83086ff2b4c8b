use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

use crate::utils::clean_name;

/// 项目根目录下的一个组织目录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDirectory {
    /// 目录名
    pub name: String,

    /// 完整路径
    pub path: PathBuf,
}

/// 组织目录下的一个项目目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDirectory {
    /// 原始目录名（可能带 `YYMMDD_` 前缀）
    pub raw_name: String,

    /// 去掉日期前缀并统一大小写、分隔符后的名称
    pub clean_name: String,

    /// 所属组织
    pub organization: String,

    /// 完整路径
    pub path: PathBuf,

    /// 创建时间（只有读取过元数据时才有值）
    #[serde(skip)]
    pub created_at: Option<SystemTime>,
}

/// 搜索结果，渲染报告时使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub raw_name: String,
    pub clean_name: String,
    pub organization: String,
    pub path: PathBuf,
}

impl OrganizationDirectory {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl ProjectDirectory {
    /// 根据目录项构建项目，清洗名称在这里一次算好
    ///
    /// `path` 使用目录项的真实路径，不由 `raw_name` 拼接。
    pub fn new(
        organization: &OrganizationDirectory,
        raw_name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        let raw_name = raw_name.into();
        Self {
            clean_name: clean_name(&raw_name),
            organization: organization.name.clone(),
            path: path.into(),
            raw_name,
            created_at: None,
        }
    }

    /// 附带创建时间
    pub fn with_created_at(mut self, created_at: Option<SystemTime>) -> Self {
        self.created_at = created_at;
        self
    }
}

impl From<ProjectDirectory> for QueryResult {
    fn from(project: ProjectDirectory) -> Self {
        Self {
            raw_name: project.raw_name,
            clean_name: project.clean_name,
            organization: project.organization,
            path: project.path,
        }
    }
}
