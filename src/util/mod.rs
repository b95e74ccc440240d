//! Utility modules

pub mod paths;
pub mod sorted;

pub use paths::{config_path, data_dir, init_data_dir, log_file_path, logs_dir};
pub use sorted::{insert_sorted, sorted_lookup, Lookup};
