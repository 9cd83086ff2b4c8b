pub mod file_entry;
pub mod project;
pub mod stats;

pub use file_entry::FileEntry;
pub use project::{OrganizationDirectory, ProjectDirectory, QueryResult};
pub use stats::OrganizationStats;
