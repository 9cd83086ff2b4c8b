use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{IoResultExt, Result};
use crate::scanner::list_directory_names;
use crate::utils::{date_prefix, snakify};

/// 项目目录中的元数据文件名
pub const PROJECT_FILE_NAME: &str = "project.toml";

/// 创建项目的请求
#[derive(Debug, Clone)]
pub struct MakeRequest {
    /// 组织名，必须已存在于项目根目录下
    pub organization: String,

    /// 用户输入的项目名
    pub name: String,

    /// 目录名前缀使用的日期
    pub date: NaiveDate,

    /// 是否写入 project.toml
    pub project_file: bool,
}

/// 创建项目的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MakeOutcome {
    /// 项目目录已创建
    Created {
        project_path: PathBuf,
        workspace: Option<WorkspaceOutcome>,
    },

    /// 组织不存在
    UnknownOrganization { available: Vec<String> },

    /// 项目名清洗后为空
    InvalidName,

    /// 同名项目目录已存在
    AlreadyExists { path: PathBuf, safe_name: String },
}

/// 工作区目录的创建结果（不影响项目本身）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceOutcome {
    Created(PathBuf),
    UnknownOrganization,
    AlreadyExists(PathBuf),
}

/// project.toml 的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<toml::value::Datetime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    #[serde(default)]
    pub archived: bool,
}

impl ProjectFile {
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Result<Self> {
        let created_at = created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .parse::<toml::value::Datetime>()?;
        Ok(Self {
            name: name.to_string(),
            created_at: Some(created_at),
            workspace: None,
            archived: false,
        })
    }
}

/// 项目管理器 - 在组织目录下创建带日期前缀的项目目录
pub struct ProjectManager {
    project_root: PathBuf,

    /// 设置后同时在工作区根目录下创建同名目录
    workspace_root: Option<PathBuf>,
}

impl ProjectManager {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            workspace_root: None,
        }
    }

    pub fn with_workspace_root(mut self, workspace_root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(workspace_root.into());
        self
    }

    /// 目录名：`YYMMDD_` 前缀加清洗后的项目名
    pub fn directory_name(request: &MakeRequest) -> Option<String> {
        let safe_name = snakify(&request.name);
        if safe_name.is_empty() {
            return None;
        }
        Some(format!("{}_{}", date_prefix(request.date), safe_name))
    }

    /// 创建项目
    ///
    /// 目录只通过一次 `create_dir` 创建，已存在时返回 `AlreadyExists`，
    /// 不会覆盖已有内容。
    pub async fn make(&self, request: &MakeRequest, now: DateTime<Utc>) -> Result<MakeOutcome> {
        let organizations = list_directory_names(&self.project_root).await?;
        if !organizations.contains(&request.organization) {
            return Ok(MakeOutcome::UnknownOrganization {
                available: organizations,
            });
        }

        let Some(directory_name) = Self::directory_name(request) else {
            return Ok(MakeOutcome::InvalidName);
        };

        let project_path = self
            .project_root
            .join(&request.organization)
            .join(&directory_name);

        if !create_directory(&project_path).await? {
            return Ok(MakeOutcome::AlreadyExists {
                path: project_path,
                safe_name: snakify(&request.name),
            });
        }
        tracing::info!("已创建项目目录: {}", project_path.display());

        // 先写项目文件，工作区步骤失败时项目目录也不会缺少它
        let mut project_file = None;
        if request.project_file {
            let file = ProjectFile::new(&request.name, now)?;
            write_project_file(&project_path, &file).await?;
            project_file = Some(file);
        }

        let workspace = match &self.workspace_root {
            Some(workspace_root) => Some(
                self.make_workspace(workspace_root, &request.organization, &directory_name)
                    .await?,
            ),
            None => None,
        };

        // 工作区创建成功后把路径补进项目文件
        if let (Some(mut file), Some(WorkspaceOutcome::Created(path))) = (project_file, &workspace) {
            file.workspace = Some(path.display().to_string());
            write_project_file(&project_path, &file).await?;
        }

        Ok(MakeOutcome::Created {
            project_path,
            workspace,
        })
    }

    async fn make_workspace(
        &self,
        workspace_root: &Path,
        organization: &str,
        directory_name: &str,
    ) -> Result<WorkspaceOutcome> {
        let organizations = list_directory_names(workspace_root).await?;
        if !organizations.iter().any(|name| name == organization) {
            return Ok(WorkspaceOutcome::UnknownOrganization);
        }

        let workspace_path = workspace_root.join(organization).join(directory_name);
        if !create_directory(&workspace_path).await? {
            return Ok(WorkspaceOutcome::AlreadyExists(workspace_path));
        }

        tracing::info!("已创建工作区目录: {}", workspace_path.display());
        Ok(WorkspaceOutcome::Created(workspace_path))
    }
}

/// 创建单个目录；已存在时返回 false
async fn create_directory(path: &Path) -> Result<bool> {
    match fs::create_dir(path).await {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(crate::error::Error::io(path, err)),
    }
}

async fn write_project_file(project_path: &Path, file: &ProjectFile) -> Result<()> {
    let content = toml::to_string(file)?;
    let path = project_path.join(PROJECT_FILE_NAME);
    fs::write(&path, content).await.with_path(&path)
}

/// 输出创建结果
pub fn write_make_report<W: Write>(
    out: &mut W,
    request: &MakeRequest,
    outcome: &MakeOutcome,
) -> io::Result<()> {
    match outcome {
        MakeOutcome::Created {
            project_path,
            workspace,
        } => {
            writeln!(out, "✅ Created project: {}", project_path.display())?;
            match workspace {
                Some(WorkspaceOutcome::Created(path)) => {
                    writeln!(out, "✅ Created workspace: {}", path.display())?;
                }
                Some(WorkspaceOutcome::UnknownOrganization) => {
                    writeln!(
                        out,
                        "The workspace organization \"{}\" does not exist",
                        request.organization
                    )?;
                    writeln!(out)?;
                }
                Some(WorkspaceOutcome::AlreadyExists(path)) => {
                    writeln!(out, "The workspace \"{}\" already exists:", request.name)?;
                    writeln!(out, "  {}", path.display())?;
                    writeln!(out)?;
                }
                None => {}
            }
        }
        MakeOutcome::UnknownOrganization { available } => {
            writeln!(
                out,
                "The organization \"{}\" does not exist",
                request.organization
            )?;
            writeln!(out)?;
            write_available_organizations(out, available)?;
        }
        MakeOutcome::InvalidName => {
            writeln!(
                out,
                "The project name \"{}\" has no usable characters",
                request.name
            )?;
            writeln!(out)?;
            writeln!(out, "Example:")?;
            writeln!(out, "  make {} \"tax returns\"", request.organization)?;
        }
        MakeOutcome::AlreadyExists { path, safe_name } => {
            writeln!(out, "The project \"{}\" already exists:", request.name)?;
            writeln!(out, "  {}", path.display())?;
            writeln!(out)?;
            writeln!(
                out,
                "Choose a different name, different date or change the existing project"
            )?;
            writeln!(out)?;
            writeln!(out, "Example:")?;
            writeln!(out, "  make {} \"{}_2\"", request.organization, safe_name)?;
            writeln!(
                out,
                "  make {} \"{}\" --date 2021-01-01",
                request.organization, safe_name
            )?;
        }
    }
    Ok(())
}

/// 列出现有组织
pub fn write_available_organizations<W: Write>(out: &mut W, available: &[String]) -> io::Result<()> {
    writeln!(out, "Available organizations:")?;
    for name in available {
        writeln!(out, "  {}", name)?;
    }
    Ok(())
}
