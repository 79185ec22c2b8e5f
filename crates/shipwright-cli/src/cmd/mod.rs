pub mod log;
pub mod run;
pub mod scan;
pub mod state;
pub mod tracks;

use shipwright_core::config;
use std::path::{Path, PathBuf};

/// Resolve the data directory for read-only commands: an explicit flag wins,
/// then DATA_DIR from the settings file (read leniently, no required-key
/// validation), then the default.
pub fn resolve_data_dir(env_file: &Path, flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Ok(content) = std::fs::read_to_string(env_file) {
        if let Some(dir) = config::parse_env_file(&content).get("DATA_DIR") {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
    }
    PathBuf::from(config::DEFAULT_DATA_DIR)
}
