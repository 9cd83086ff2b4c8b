pub mod defaults;
pub mod settings;

pub use settings::{
    Config, DisplayConfig, IgnoreConfig, OutputFormat, RootsConfig, ScanConfig,
    PROJECT_ROOT_ENV, WORKSPACE_ROOT_ENV,
};
