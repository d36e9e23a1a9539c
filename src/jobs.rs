//! Scheduled-job snapshot handling.
//!
//! The core never computes schedules. It only displays the job list and,
//! during a sync, rolls an overdue `nextRun` forward by a fixed increment
//! inferred from keywords in the human-readable schedule text.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

use crate::models::JobRecord;

pub fn load_jobs(path: &Path) -> Result<Vec<JobRecord>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read jobs file: {}", path.display()))?;
    let jobs: Vec<JobRecord> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse jobs file: {}", path.display()))?;
    Ok(jobs)
}

/// Bump every overdue job's `next_run` once: a schedule mentioning "daily"
/// advances one day, else "hour" one hour, else "min" ten minutes (first
/// keyword wins). Overdue jobs also get `last_run` set to five minutes ago,
/// keyword match or not.
pub fn roll_forward(jobs: &mut [JobRecord], now: DateTime<Utc>) {
    for job in jobs.iter_mut() {
        if job.next_run >= now {
            continue;
        }

        if job.schedule.contains("daily") {
            job.next_run += Duration::days(1);
        } else if job.schedule.contains("hour") {
            job.next_run += Duration::hours(1);
        } else if job.schedule.contains("min") {
            job.next_run += Duration::minutes(10);
        }

        job.last_run = Some(now - Duration::minutes(5));
    }
}
