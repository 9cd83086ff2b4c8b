pub mod config;
pub mod error;
pub mod models;
pub mod operations;
pub mod scanner;
pub mod utils;

// 重新导出常用类型
pub use error::{Error, Result};
pub use models::{FileEntry, OrganizationStats, QueryResult};
pub use operations::{collect_stats, FindOptions, ProjectFinder, StatsOutcome};
pub use scanner::{FileWalker, ScanObserver};
