use std::io::{self, Write};
use std::path::Path;
use tokio::fs;

use crate::error::{IoResultExt, Result};
use crate::models::OrganizationStats;
use crate::scanner::{list_organizations, list_projects};
use crate::utils::{created_time, local_year};

/// 统计结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOutcome {
    /// 每个组织的年份统计，顺序与组织的枚举顺序一致
    Report(Vec<OrganizationStats>),

    /// 指定的组织不存在，附带现有的组织名
    UnknownOrganization { name: String, available: Vec<String> },
}

/// 按创建年份统计项目数量
///
/// 只列出组织下的一层项目目录并读取其元数据，不会递归，也不读取文件内容。
/// 空的组织名等同于不指定组织。
pub async fn collect_stats(root: &Path, organization: Option<&str>) -> Result<StatsOutcome> {
    let organization = organization.filter(|name| !name.is_empty());
    let organizations = list_organizations(root).await?;

    if let Some(name) = organization {
        if !organizations.iter().any(|org| org.name == name) {
            return Ok(StatsOutcome::UnknownOrganization {
                name: name.to_string(),
                available: organizations.into_iter().map(|org| org.name).collect(),
            });
        }
    }

    let mut report = Vec::new();
    for org in organizations
        .iter()
        .filter(|org| organization.map_or(true, |name| org.name == name))
    {
        let mut stats = OrganizationStats::new(&org.name);

        for project in list_projects(org).await? {
            let metadata = fs::metadata(&project.path).await.with_path(&project.path)?;
            let project = project.with_created_at(created_time(&metadata));
            stats.record(project.created_at.map(local_year));
        }

        tracing::debug!("{}: {} 个项目", stats.organization, stats.total);
        report.push(stats);
    }

    Ok(StatsOutcome::Report(report))
}

/// 输出统计报告：年份升序，最后是总数，每个组织后空一行
pub fn write_stats_report<W: Write>(out: &mut W, report: &[OrganizationStats]) -> io::Result<()> {
    for stats in report {
        writeln!(out, "{}", stats.organization)?;
        for (year, count) in &stats.by_year {
            writeln!(out, "  {}: {}", year, count)?;
        }
        writeln!(out, "  total: {}", stats.total)?;
        writeln!(out)?;
    }
    Ok(())
}
