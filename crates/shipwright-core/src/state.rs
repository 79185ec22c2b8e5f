//! Durable cycle state: the sole source of truth for "what runs next".
//!
//! Loaded once at cycle start, mutated in memory, written back exactly once
//! at the end of the run. The on-disk JSON keeps the external field names
//! (`lastRunDate`, `trackState`, `lastIndex`).

use crate::error::Result;
use crate::io;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCursor {
    #[serde(rename = "lastIndex")]
    pub last_index: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleState {
    #[serde(rename = "lastRunDate")]
    pub last_run_date: Option<NaiveDate>,

    #[serde(rename = "trackState", default)]
    pub tracks: BTreeMap<String, TrackCursor>,
}

impl CycleState {
    /// Load state from `path`, defaulting to empty state when the file is
    /// absent (first ever run).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        io::atomic_write(path, data.as_bytes())
    }

    /// Advance a track's rotation cursor and return the selected index.
    ///
    /// A track never seen before starts at -1, so its first selection is 0.
    /// Rotation is total: after the last idea it wraps back to the first.
    pub fn advance(&mut self, track: &str, len: usize) -> usize {
        let cursor = self
            .tracks
            .entry(track.to_string())
            .or_insert(TrackCursor { last_index: -1 });
        let next = ((cursor.last_index + 1) % len as i64) as usize;
        cursor.last_index = next as i64;
        next
    }

    pub fn cursor(&self, track: &str) -> i64 {
        self.tracks.get(track).map_or(-1, |c| c.last_index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
