use futures::stream::{self, StreamExt, TryStreamExt};
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::QueryResult;
use crate::scanner::{list_organizations, list_projects, FileWalker};
use crate::utils::clean_name;

/// 搜索选项
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// 要求项目中至少有一个条目带此扩展名（含前导点，区分大小写）
    pub extension: Option<String>,
}

/// 按名称（以及可选的扩展名）查找项目
pub struct ProjectFinder {
    walker: FileWalker,

    /// 同时进行的扩展名扫描数
    concurrent_scans: usize,
}

impl ProjectFinder {
    pub fn new(walker: FileWalker) -> Self {
        Self {
            walker,
            concurrent_scans: 1,
        }
    }

    /// 允许多个项目的扩展名扫描同时进行，结果顺序不变
    pub fn with_concurrency(mut self, concurrent_scans: usize) -> Self {
        self.concurrent_scans = concurrent_scans.max(1);
        self
    }

    /// 查找名称包含 `query` 的项目
    ///
    /// 结果保持组织的枚举顺序，组织内保持项目的枚举顺序。空查询匹配所有项目。
    /// 只有名称匹配的项目才会做扩展名扫描；没有扩展名条件时完全不扫描。
    pub async fn find(
        &self,
        root: &Path,
        query: &str,
        options: &FindOptions,
    ) -> Result<Vec<QueryResult>> {
        let needle = clean_name(query);
        let mut candidates = Vec::new();

        for organization in list_organizations(root).await? {
            for project in list_projects(&organization).await? {
                if project.clean_name.contains(&needle) {
                    candidates.push(project);
                }
            }
        }

        let Some(extension) = options.extension.as_deref() else {
            return Ok(candidates.into_iter().map(QueryResult::from).collect());
        };

        tracing::debug!(
            "按扩展名 {} 扫描 {} 个候选项目",
            extension,
            candidates.len()
        );

        // buffered 保证输出顺序与输入一致
        let matches: Vec<bool> = stream::iter(candidates.iter())
            .map(|project| self.walker.contains_extension(&project.path, extension))
            .buffered(self.concurrent_scans)
            .try_collect()
            .await?;

        Ok(candidates
            .into_iter()
            .zip(matches)
            .filter_map(|(project, matched)| matched.then(|| QueryResult::from(project)))
            .collect())
    }
}

/// 输出搜索报告
///
/// 连续的同组织结果共用一个标题，组之间空一行；名称按整个结果集中
/// 最长的清洗名称补齐，保证路径列在所有组之间对齐。
pub fn write_find_report<W: Write>(
    out: &mut W,
    query: &str,
    results: &[QueryResult],
    column_gap: usize,
) -> io::Result<()> {
    writeln!(out, "Found {} results for \"{}\":", results.len(), query)?;
    writeln!(out)?;

    let width = results
        .iter()
        .map(|result| result.clean_name.chars().count())
        .max()
        .unwrap_or(0);
    let gap = " ".repeat(column_gap);

    let mut last_organization: Option<&str> = None;
    for result in results {
        if last_organization != Some(result.organization.as_str()) {
            if last_organization.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "{}:", result.organization)?;
            last_organization = Some(&result.organization);
        }

        writeln!(
            out,
            "  {:<width$}{}{}",
            result.clean_name,
            gap,
            result.path.display(),
            width = width
        )?;
    }

    Ok(())
}
