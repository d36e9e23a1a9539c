//! Snapshot statistics and the `mc stats` overview command.
//!
//! Gives a quick summary of what the last sync produced: activity counts,
//! job state, index size. Used to gain confidence that syncs are landing.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::models::{ActivityKind, ActivityRecord, ActivityStatus, DocumentRecord, JobRecord, Stats};
use crate::snapshot;

/// Derive the stats snapshot from the other freshly built datasets.
pub fn compute_stats(
    activities: &[ActivityRecord],
    jobs: &[JobRecord],
    now: DateTime<Utc>,
) -> Stats {
    let today = now.date_naive();
    let successes = activities
        .iter()
        .filter(|a| a.status == ActivityStatus::Success)
        .count();

    Stats {
        last_sync: now,
        active_cron_jobs: jobs.iter().filter(|j| j.enabled).count(),
        today_activities: activities
            .iter()
            .filter(|a| a.timestamp.date() == today)
            .count(),
        success_rate: if activities.is_empty() {
            100
        } else {
            ((successes * 100) / activities.len()) as u32
        },
        replies_sent: activities
            .iter()
            .filter(|a| a.kind == ActivityKind::Reply)
            .count(),
        tweets_posted: activities
            .iter()
            .filter(|a| a.kind == ActivityKind::Tweet)
            .count(),
    }
}

/// Run the stats command: read the snapshot files and print a summary.
/// Missing snapshots read as empty rather than failing the overview.
pub fn run_stats(config: &Config) -> Result<()> {
    let activities: Vec<ActivityRecord> =
        snapshot::load(&config.data_path(snapshot::ACTIVITIES_FILE)).unwrap_or_default();
    let jobs: Vec<JobRecord> =
        snapshot::load(&config.data_path(snapshot::JOBS_FILE)).unwrap_or_default();
    let index: Vec<DocumentRecord> =
        snapshot::load(&config.data_path(snapshot::INDEX_FILE)).unwrap_or_default();
    let stats: Option<Stats> = snapshot::load(&config.data_path(snapshot::STATS_FILE)).ok();

    let indexed_bytes: u64 = index.iter().map(|d| d.size as u64).sum();

    println!("Mission Control — Snapshot Stats");
    println!("================================");
    println!();
    println!("  Data dir:    {}", config.data.dir.display());
    let last_sync = match &stats {
        Some(s) => format_ts_relative(s.last_sync.timestamp()),
        None => "never".to_string(),
    };
    println!("  Last sync:   {}", last_sync);
    println!();
    println!("  Documents:   {}", index.len());
    println!("  Indexed:     {}", format_bytes(indexed_bytes));
    println!("  Activities:  {}", activities.len());
    println!(
        "  Jobs:        {} ({} enabled)",
        jobs.len(),
        jobs.iter().filter(|j| j.enabled).count()
    );

    if !activities.is_empty() {
        println!();
        println!("  Activities by category:");
        let mut counts: Vec<(String, usize)> = Vec::new();
        for a in &activities {
            let label = format!("{:?}", a.kind).to_lowercase();
            match counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        for (label, n) in &counts {
            println!("    {:<12} {:>5}", label, n);
        }
    }

    println!();
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
