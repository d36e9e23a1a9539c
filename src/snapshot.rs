//! Snapshot file I/O.
//!
//! Each derived dataset lives in one JSON file that is replaced wholesale
//! on every sync. Writes go through a temp-file-then-rename so a reader
//! never observes a partially written snapshot.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub const ACTIVITIES_FILE: &str = "activities.json";
pub const JOBS_FILE: &str = "cron-jobs.json";
pub const INDEX_FILE: &str = "search-index.json";
pub const STATS_FILE: &str = "stats.json";

pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

pub fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(value)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    std::fs::write(tmp, json)
        .with_context(|| format!("Failed to write snapshot: {}", tmp.display()))?;
    std::fs::rename(tmp, path)
        .with_context(|| format!("Failed to replace snapshot: {}", path.display()))?;

    Ok(())
}
