use crate::error::Result;
use crate::io;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Append-only diagnostic log, persisted as a JSON array.
///
/// The whole file is rewritten on every append. That keeps the file valid
/// JSON at all times, at the cost of ruling out concurrent writers, which
/// the single-process model already rules out.
#[derive(Debug, Clone)]
pub struct Logbook {
    path: PathBuf,
}

impl Logbook {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, message: &str) -> Result<()> {
        let mut entries = self.entries()?;
        entries.push(LogEntry {
            timestamp: Utc::now(),
            message: message.to_string(),
        });
        let data = serde_json::to_string_pretty(&entries)?;
        io::atomic_write(&self.path, data.as_bytes())
    }

    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
