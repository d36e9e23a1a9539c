//! Dated note discovery.
//!
//! The agent writes one markdown note per day, named `YYYY-MM-DD.md`, into
//! the workspace's notes directory. This module finds those files; a missing
//! directory is treated as an empty set, not an error.

use anyhow::Result;
use chrono::NaiveDate;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List note files matching the configured globs, sorted by filename.
///
/// Only the top level of the directory is scanned; the agent does not nest
/// notes. Unreadable entries are skipped.
pub fn list_note_files(dir: &Path, globs: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let include_set = build_globset(globs)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).max_depth(1).into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if include_set.is_match(&name) {
            files.push(entry.path().to_path_buf());
        }
    }

    // Deterministic ordering
    files.sort();

    Ok(files)
}

/// List dated notes (`YYYY-MM-DD.md`), newest first.
///
/// Files whose stem does not parse as a calendar date are ignored.
pub fn list_dated_notes(dir: &Path, globs: &[String]) -> Result<Vec<(NaiveDate, PathBuf)>> {
    let mut dated: Vec<(NaiveDate, PathBuf)> = list_note_files(dir, globs)?
        .into_iter()
        .filter_map(|path| {
            let stem = path.file_stem()?.to_string_lossy().to_string();
            let date = NaiveDate::parse_from_str(&stem, "%Y-%m-%d").ok()?;
            Some((date, path))
        })
        .collect();

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(dated)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn md_globs() -> Vec<String> {
        vec!["*.md".to_string()]
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nope");
        assert!(list_note_files(&dir, &md_globs()).unwrap().is_empty());
        assert!(list_dated_notes(&dir, &md_globs()).unwrap().is_empty());
    }

    #[test]
    fn test_dated_notes_newest_first() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("2026-01-02.md"), "b").unwrap();
        fs::write(tmp.path().join("2026-01-05.md"), "c").unwrap();
        fs::write(tmp.path().join("2026-01-01.md"), "a").unwrap();
        fs::write(tmp.path().join("notes.md"), "undated").unwrap();
        fs::write(tmp.path().join("2026-01-03.txt"), "wrong ext").unwrap();

        let dated = list_dated_notes(tmp.path(), &md_globs()).unwrap();
        let dates: Vec<String> = dated.iter().map(|(d, _)| d.to_string()).collect();
        assert_eq!(dates, vec!["2026-01-05", "2026-01-02", "2026-01-01"]);
    }

    #[test]
    fn test_undated_markdown_still_listed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("scratch.md"), "x").unwrap();
        fs::write(tmp.path().join("2026-01-01.md"), "y").unwrap();

        let all = list_note_files(tmp.path(), &md_globs()).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_subdirectories_not_scanned() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("archive");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("2025-12-31.md"), "old").unwrap();
        fs::write(tmp.path().join("2026-01-01.md"), "new").unwrap();

        let all = list_note_files(tmp.path(), &md_globs()).unwrap();
        assert_eq!(all.len(), 1);
    }
}
