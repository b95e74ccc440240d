//! Where the CLI keeps its config and logs
//!
//! Everything lives under one data directory, `~/.sandbox-workspace` unless
//! `--data-dir` overrides it.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DATA_DIR_NAME: &str = ".sandbox-workspace";
const CONFIG_FILE: &str = "config.toml";
const LOGS_DIR: &str = "logs";
const LOG_FILE: &str = "workspace.log";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Pin the data directory for the rest of the process.
///
/// Call before loading config or opening the log file. Only the first call
/// takes effect; returns whether this one did.
pub fn init_data_dir(custom_path: Option<PathBuf>) -> bool {
    let path = custom_path.unwrap_or_else(default_data_dir);
    match DATA_DIR.set(path) {
        Ok(()) => true,
        Err(rejected) => {
            tracing::debug!(
                rejected = %rejected.display(),
                current = %data_dir().display(),
                "Data directory already pinned"
            );
            false
        }
    }
}

fn default_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DATA_DIR_NAME),
        None => PathBuf::from(DATA_DIR_NAME),
    }
}

/// The pinned data directory, or the default one if none was pinned
pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

pub fn logs_dir() -> PathBuf {
    logs_dir_in(&data_dir())
}

pub fn log_file_path() -> PathBuf {
    logs_dir().join(LOG_FILE)
}

pub fn config_path() -> PathBuf {
    data_dir().join(CONFIG_FILE)
}

fn logs_dir_in(base: &Path) -> PathBuf {
    base.join(LOGS_DIR)
}
