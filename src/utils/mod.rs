pub mod names;
pub mod time_format;

pub use names::{clean_name, date_prefix, normalize, snakify, strip_date_prefix};
pub use time_format::{created_time, local_year};
