//! Offline snapshot rebuild.
//!
//! Regenerates all four derived JSON files wholesale from the workspace:
//! activities (classified from the newest dated notes), jobs (rolled
//! forward), the content index, and the stats object. Run-to-completion,
//! single pass, no locking; atomicity comes from the temp-then-rename
//! writes in [`crate::snapshot`].

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::classify;
use crate::config::Config;
use crate::index;
use crate::jobs;
use crate::models::{ActivityRecord, JobRecord};
use crate::notes;
use crate::snapshot;
use crate::stats;

/// Rebuild every snapshot. `now` is passed in rather than read from the
/// ambient clock so the pipeline stays testable.
pub fn run_sync(config: &Config, now: DateTime<Utc>, dry_run: bool) -> Result<()> {
    let activities = build_activities(config)?;

    let jobs_path = config.data_path(snapshot::JOBS_FILE);
    let mut job_list: Vec<JobRecord> = if jobs_path.exists() {
        jobs::load_jobs(&jobs_path)?
    } else {
        warn!(path = %jobs_path.display(), "jobs snapshot missing, starting empty");
        Vec::new()
    };
    jobs::roll_forward(&mut job_list, now);

    let content_index = index::build_index(config);

    let stats = stats::compute_stats(&activities, &job_list, now);

    if dry_run {
        println!("sync workspace (dry-run)");
        println!("  activities: {}", activities.len());
        println!("  jobs: {}", job_list.len());
        println!("  documents indexed: {}", content_index.len());
        return Ok(());
    }

    snapshot::write_atomic(&config.data_path(snapshot::ACTIVITIES_FILE), &activities)?;
    snapshot::write_atomic(&jobs_path, &job_list)?;
    snapshot::write_atomic(&config.data_path(snapshot::INDEX_FILE), &content_index)?;
    snapshot::write_atomic(&config.data_path(snapshot::STATS_FILE), &stats)?;

    println!("sync workspace");
    println!("  activities: {}", activities.len());
    println!("  jobs: {}", job_list.len());
    println!("  documents indexed: {}", content_index.len());
    println!("  snapshots written: 4");
    println!("ok");

    Ok(())
}

/// Classify the newest `recent_days` dated notes into activity records,
/// sharing one id counter across the whole run. A missing notes directory
/// means an empty feed, not an error.
fn build_activities(config: &Config) -> Result<Vec<ActivityRecord>> {
    let notes_path = config.notes_path();
    if !notes_path.exists() {
        warn!(path = %notes_path.display(), "notes directory not found");
        return Ok(Vec::new());
    }

    let dated = notes::list_dated_notes(&notes_path, &config.workspace.note_globs)?;

    let mut activities = Vec::new();
    let mut next_id = 0usize;

    for (date, path) in dated.iter().take(config.retrieval.recent_days) {
        let Ok(text) = std::fs::read_to_string(path) else {
            warn!(path = %path.display(), "skipping unreadable note");
            continue;
        };
        activities.extend(classify::classify_note(
            *date,
            &text,
            &mut next_id,
            config.retrieval.description_chars,
        ));
    }

    Ok(activities)
}
