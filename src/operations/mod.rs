pub mod find;
pub mod project_manager;
pub mod stats;

pub use find::{write_find_report, FindOptions, ProjectFinder};
pub use project_manager::{
    write_available_organizations, write_make_report, MakeOutcome, MakeRequest, ProjectFile,
    ProjectManager, WorkspaceOutcome,
};
pub use stats::{collect_stats, write_stats_report, StatsOutcome};
