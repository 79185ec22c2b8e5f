//! Settings loaded once at startup from a key=value file and passed by
//! reference into every component. No component reads ambient process
//! environment directly.

use crate::error::{Result, ShipwrightError};
use secrecy::SecretString;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_DATA_DIR: &str = ".shipwright";
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "qwen/qwen3-coder:free";
pub const DEFAULT_FORGE_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_BOARD_BASE_URL: &str = "https://moltbook.com";
pub const DEFAULT_BOARD_CHANNEL: &str = "builds";
pub const DEFAULT_PAUSE_SECS: u64 = 1800;
pub const DEFAULT_COMMIT_NAME: &str = "Shipwright Agent";
pub const DEFAULT_COMMIT_EMAIL: &str = "agent@shipwright.dev";

/// Keys that must be present and non-empty before anything else runs.
const REQUIRED_KEYS: [&str; 4] = [
    "COMPLETION_API_KEY",
    "FORGE_TOKEN",
    "FORGE_OWNER",
    "BOARD_API_KEY",
];

// ---------------------------------------------------------------------------
// Env file parsing
// ---------------------------------------------------------------------------

/// Parse dotenv-style content: blank lines and `#` comments are skipped,
/// each remaining line is split at the first `=`, keys and values trimmed.
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                map.insert(key.to_string(), value.trim().to_string());
            }
        }
    }
    map
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Settings {
    pub completion_api_key: SecretString,
    pub completion_base_url: String,
    pub completion_model: String,

    pub forge_token: SecretString,
    pub forge_api_base: String,
    pub forge_owner: String,

    pub board_api_key: SecretString,
    pub board_base_url: String,
    pub board_channel: String,

    pub data_dir: PathBuf,
    pub pause_secs: u64,
    pub commit_name: String,
    pub commit_email: String,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ShipwrightError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_map(parse_env_file(&content))
    }

    /// Validate and build settings from a parsed key=value map.
    /// All missing required keys are reported together.
    pub fn from_map(map: BTreeMap<String, String>) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| map.get(**key).map_or(true, |v| v.is_empty()))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ShipwrightError::MissingKeys(missing));
        }

        let pause_secs = match map.get("PAUSE_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ShipwrightError::InvalidValue("PAUSE_SECS".to_string()))?,
            None => DEFAULT_PAUSE_SECS,
        };

        let get = |key: &str, default: &str| -> String {
            map.get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            completion_api_key: SecretString::new(map["COMPLETION_API_KEY"].clone()),
            completion_base_url: get("COMPLETION_BASE_URL", DEFAULT_COMPLETION_BASE_URL),
            completion_model: get("COMPLETION_MODEL", DEFAULT_COMPLETION_MODEL),
            forge_token: SecretString::new(map["FORGE_TOKEN"].clone()),
            forge_api_base: get("FORGE_API_BASE", DEFAULT_FORGE_API_BASE),
            forge_owner: map["FORGE_OWNER"].clone(),
            board_api_key: SecretString::new(map["BOARD_API_KEY"].clone()),
            board_base_url: get("BOARD_BASE_URL", DEFAULT_BOARD_BASE_URL),
            board_channel: get("BOARD_CHANNEL", DEFAULT_BOARD_CHANNEL),
            data_dir: PathBuf::from(get("DATA_DIR", DEFAULT_DATA_DIR)),
            pause_secs,
            commit_name: get("COMMIT_NAME", DEFAULT_COMMIT_NAME),
            commit_email: get("COMMIT_EMAIL", DEFAULT_COMMIT_EMAIL),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
