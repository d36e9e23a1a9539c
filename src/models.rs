//! Core data models shared between the sync pipeline, the search engine,
//! and the HTTP API.
//!
//! All wire-facing structs serialize with the field names the dashboard's
//! JSON snapshot files use (`type`, `nextRun`, `lastRun`, ...). Category
//! sets are closed enumerations; callers cannot extend them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content category of an indexed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Memory,
    Document,
    Task,
    Conversation,
}

/// Category of a classified activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Tweet,
    Reply,
    Cron,
    Search,
    Memory,
    Task,
    Message,
}

/// Outcome of an activity. The classifier only ever emits `Success`;
/// the other variants exist because consumers of the snapshot may
/// write records of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Pending,
    Failed,
}

/// Display category of a scheduled job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Tweet,
    Check,
    Research,
    Engagement,
    Report,
    Other,
}

/// Indexed metadata about one source text file.
///
/// Rebuilt wholesale on every sync; the relative path is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: DocKind,
    pub title: String,
    pub preview: String,
    pub date: NaiveDate,
    pub size: usize,
}

/// One heuristically classified event derived from a line of a dated note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    /// Calendar date of the note plus a synthetic time-of-day chosen by
    /// the rule category, not the actual event time.
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub status: ActivityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

/// A scored match returned by the search engine. Derived per query,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocKind,
    pub title: String,
    pub content: String,
    pub path: String,
    pub date: NaiveDate,
    /// Substring match frequency mapped into [0.5, 1.0]; not semantic
    /// similarity.
    pub relevance: f64,
}

/// A scheduled job as recorded in `cron-jobs.json`. Read-only from the
/// core's perspective apart from the overdue roll-forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub name: String,
    /// Human-readable schedule description, e.g. "daily at 9am".
    pub schedule: String,
    pub next_run: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: JobKind,
}

/// Summary counters derived from the other snapshots during a sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub last_sync: DateTime<Utc>,
    pub active_cron_jobs: usize,
    pub today_activities: usize,
    /// Percentage of classified activities with `Success` status.
    pub success_rate: u32,
    pub replies_sent: usize,
    pub tweets_posted: usize,
}
