use chrono::{DateTime, Datelike, Local};
use std::fs::Metadata;
use std::time::SystemTime;

/// 取目录的创建时间
///
/// 部分文件系统不记录创建时间，此时退回到最后修改时间。
pub fn created_time(metadata: &Metadata) -> Option<SystemTime> {
    match metadata.created() {
        Ok(created) => Some(created),
        Err(err) => {
            tracing::debug!("无法读取创建时间，改用修改时间: {}", err);
            metadata.modified().ok()
        }
    }
}

/// 按本地时区换算出年份
pub fn local_year(time: SystemTime) -> i32 {
    DateTime::<Local>::from(time).year()
}
