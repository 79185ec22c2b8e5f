use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShipwrightError {
    #[error("settings file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("missing required settings: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("invalid value for setting {0}")]
    InvalidValue(String),

    #[error("completion request failed with status {status}: {body}")]
    Generation { status: u16, body: String },

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("repository creation failed: {0}")]
    RepoCreate(String),

    #[error("secrets detected in generated tree: {0}")]
    SecretsDetected(String),

    #[error("secret scan failed: {0}")]
    ScanFailed(String),

    #[error("git binary not found on PATH")]
    GitNotFound,

    #[error("git {op} failed: {detail}")]
    Git { op: String, detail: String },

    #[error("announcement failed: {0}")]
    Announce(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShipwrightError>;
