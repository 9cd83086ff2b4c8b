use serde::Serialize;
use std::collections::BTreeMap;

/// 单个组织按创建年份统计的项目数量
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationStats {
    /// 组织名
    pub organization: String,

    /// 年份 -> 项目数量，按年份升序
    pub by_year: BTreeMap<i32, usize>,

    /// 项目总数
    pub total: usize,
}

impl OrganizationStats {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            ..Self::default()
        }
    }

    /// 记录一个项目
    ///
    /// 年份未知的项目只计入总数。
    pub fn record(&mut self, year: Option<i32>) {
        if let Some(year) = year {
            *self.by_year.entry(year).or_insert(0) += 1;
        }
        self.total += 1;
    }
}
