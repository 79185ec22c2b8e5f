use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File name constants
// ---------------------------------------------------------------------------

pub const STATE_FILE: &str = "cycle-state.json";
pub const LOG_FILE: &str = "cycle-log.json";
pub const SCRATCH_DIR: &str = "scratch";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn state_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STATE_FILE)
}

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

/// Root under which per-publish scratch working trees are created.
pub fn scratch_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(SCRATCH_DIR)
}
