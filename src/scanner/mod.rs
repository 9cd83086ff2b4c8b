pub mod directory_lister;
pub mod file_walker;
pub mod ignore_list;

pub use directory_lister::{
    list_directory_names, list_organizations, list_projects, list_subdirectories,
};
pub use file_walker::{FileWalker, ScanObserver};
pub use ignore_list::IgnoreList;
