//! Heuristic activity classifier.
//!
//! Tags lines of a dated note with independent keyword rules, producing one
//! [`ActivityRecord`] per rule hit. This is an annotator, not a parser: a
//! line mentioning several keywords yields several records, and activity
//! types outside the three rules are simply not covered.

use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

use crate::models::{ActivityKind, ActivityRecord, ActivityStatus};

/// External handles whose mentions count as reply activity.
const WATCHED_HANDLES: &[&str] = &["@sama", "@noahkagan", "@shaunmmaguire"];

/// Synthetic time-of-day buckets per rule category. Note lines carry no
/// event time, so each category gets a fixed hour for display ordering.
const REPLY_TIME: (u32, u32, u32) = (12, 0, 0);
const CRON_TIME: (u32, u32, u32) = (10, 0, 0);
const RESEARCH_TIME: (u32, u32, u32) = (14, 0, 0);

/// Classify one note's text. `next_id` is the run-scoped id counter shared
/// across all notes in a sync pass.
///
/// Records come out in line order; the caller imposes any timestamp
/// ordering. Every record has `Success` status — the rules have no notion
/// of failure detection.
pub fn classify_note(
    date: NaiveDate,
    text: &str,
    next_id: &mut usize,
    description_chars: usize,
) -> Vec<ActivityRecord> {
    let mut activities = Vec::new();
    let mut current_section: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            let heading = trimmed.trim_start_matches('#').trim();
            if !heading.is_empty() {
                current_section = Some(heading.to_string());
            }
        }

        let lower = line.to_lowercase();

        if (line.contains("Reply") || line.contains("replied"))
            && WATCHED_HANDLES.iter().any(|h| line.contains(h))
        {
            activities.push(make_record(
                next_id,
                date,
                REPLY_TIME,
                ActivityKind::Reply,
                "Twitter Reply",
                line,
                current_section.as_deref(),
                description_chars,
            ));
        }

        if lower.contains("cron") {
            activities.push(make_record(
                next_id,
                date,
                CRON_TIME,
                ActivityKind::Cron,
                "Cron Job",
                line,
                current_section.as_deref(),
                description_chars,
            ));
        }

        if lower.contains("research") || lower.contains("crypto") {
            activities.push(make_record(
                next_id,
                date,
                RESEARCH_TIME,
                ActivityKind::Memory,
                "Research",
                line,
                current_section.as_deref(),
                description_chars,
            ));
        }
    }

    activities
}

#[allow(clippy::too_many_arguments)]
fn make_record(
    next_id: &mut usize,
    date: NaiveDate,
    time: (u32, u32, u32),
    kind: ActivityKind,
    title: &str,
    line: &str,
    section: Option<&str>,
    description_chars: usize,
) -> ActivityRecord {
    let id = format!("act-{}", *next_id);
    *next_id += 1;

    let timestamp = date.and_time(
        NaiveTime::from_hms_opt(time.0, time.1, time.2).expect("valid synthetic time"),
    );

    let metadata = section.map(|s| {
        let mut m = BTreeMap::new();
        m.insert("section".to_string(), s.to_string());
        m
    });

    ActivityRecord {
        id,
        timestamp,
        kind,
        title: title.to_string(),
        description: strip_markers(line, description_chars),
        status: ActivityStatus::Success,
        metadata,
    }
}

/// Remove markdown emphasis/heading/list/table characters from a line and
/// truncate to the character budget.
fn strip_markers(line: &str, max_chars: usize) -> String {
    let stripped: String = line
        .chars()
        .filter(|c| !matches!(c, '|' | '*' | '#' | '-'))
        .collect();
    stripped.trim().chars().take(max_chars).collect()
}
