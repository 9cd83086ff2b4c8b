use std::collections::HashSet;

pub struct DefaultConfig;

impl DefaultConfig {
    /// 默认忽略的文件名（操作系统生成的元数据文件）
    pub fn default_ignored_file_names() -> HashSet<String> {
        [".DS_Store", "Thumbs.db"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// 默认的并发扫描数
    pub fn default_concurrent_scans() -> usize {
        num_cpus::get().clamp(1, 8)
    }

    /// 搜索结果中名称列与路径列之间的空格数
    pub fn default_column_gap() -> usize {
        8
    }
}
