//! Textual relevance search.
//!
//! Matching is literal substring containment, case-insensitive, with no
//! tokenization or stemming. Relevance is a synthetic score derived from
//! match frequency: `min(1.0, 0.5 + 0.1 * occurrences)` — any match at all
//! floors at 0.5 and the score saturates at 1.0.
//!
//! Two equivalent data sources are supported: scanning the raw workspace
//! files (full recall, used by the HTTP API) or scanning a previously built
//! index's title+preview text (faster, lower recall — full-content matches
//! outside the preview window are missed, which is accepted by design).

use anyhow::Result;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::config::Config;
use crate::index;
use crate::models::{DocKind, DocumentRecord, SearchResult};
use crate::notes;

/// Map a non-overlapping occurrence count to a relevance score in
/// [0.5, 1.0]. Monotone in the count, capped at 1.0.
pub fn relevance(occurrences: usize) -> f64 {
    (0.5 + 0.1 * occurrences as f64).min(1.0)
}

/// Compile the query as a literal, case-insensitive pattern. Any regex
/// metacharacters in the query are escaped so `c++` matches the text
/// `c++`, not a pattern error.
fn literal_matcher(query: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()?)
}

/// Search the raw workspace files: the fixed document list plus every note.
///
/// Snippets are a window from `snippet_before` characters ahead of the first
/// match to `snippet_after` characters past its end, clipped to the content,
/// with newlines flattened. Unreadable files are skipped and the scan
/// continues.
pub fn search_files(config: &Config, query: &str) -> Result<Vec<SearchResult>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let matcher = literal_matcher(query)?;

    let mut corpus: Vec<(String, DocKind)> = config
        .workspace
        .documents
        .iter()
        .map(|d| (d.path.clone(), d.kind))
        .collect();

    let note_files = notes::list_note_files(&config.notes_path(), &config.workspace.note_globs)?;
    for path in note_files {
        if let Some(name) = path.file_name() {
            let rel = format!("{}/{}", config.workspace.notes_dir, name.to_string_lossy());
            corpus.push((rel, DocKind::Memory));
        }
    }

    let mut results = Vec::new();

    for (rel_path, kind) in corpus {
        let full_path = config.workspace.root.join(&rel_path);
        let Ok(content) = std::fs::read_to_string(&full_path) else {
            debug!(path = %full_path.display(), "skipping unreadable file");
            continue;
        };

        let mut matches = matcher.find_iter(&content);
        let Some(first) = matches.next() else {
            continue;
        };
        let occurrences = 1 + matches.count();

        let snippet = snippet_around(
            &content,
            first.start(),
            first.end(),
            config.retrieval.snippet_before,
            config.retrieval.snippet_after,
        );
        let title = index::extract_title(&content).unwrap_or_else(|| index::file_stem(&rel_path));

        results.push(SearchResult {
            id: format!("search-{}", results.len()),
            kind,
            title,
            content: snippet,
            path: rel_path.clone(),
            date: index::doc_date(&rel_path, &full_path),
            relevance: relevance(occurrences),
        });
    }

    rank(&mut results, config.retrieval.final_limit);
    Ok(results)
}

/// Search a built index's title+preview text. Output shape matches
/// [`search_files`]; the snippet is the stored preview.
pub fn search_index(
    entries: &[DocumentRecord],
    query: &str,
    final_limit: usize,
) -> Result<Vec<SearchResult>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let matcher = literal_matcher(query)?;

    let mut results = Vec::new();

    for entry in entries {
        let haystack = format!("{} {}", entry.title, entry.preview);
        let occurrences = matcher.find_iter(&haystack).count();
        if occurrences == 0 {
            continue;
        }

        results.push(SearchResult {
            id: format!("search-{}", results.len()),
            kind: entry.kind,
            title: entry.title.clone(),
            content: entry.preview.clone(),
            path: entry.path.clone(),
            date: entry.date,
            relevance: relevance(occurrences),
        });
    }

    rank(&mut results, final_limit);
    Ok(results)
}

/// Sort descending by relevance (stable, so ties keep encounter order)
/// and truncate to the final limit.
fn rank(results: &mut Vec<SearchResult>, final_limit: usize) {
    results.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(final_limit);
}

/// Extract the snippet window around the first match, clipped to content
/// bounds and adjusted to char boundaries, with newlines flattened and an
/// ellipsis appended.
fn snippet_around(
    content: &str,
    match_start: usize,
    match_end: usize,
    before: usize,
    after: usize,
) -> String {
    let start = floor_char_boundary(content, match_start.saturating_sub(before));
    let end = ceil_char_boundary(content, (match_end + after).min(content.len()));

    let mut snippet = content[start..end].replace('\n', " ").trim().to_string();
    snippet.push_str("...");
    snippet
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(path: &str, title: &str, preview: &str) -> DocumentRecord {
        DocumentRecord {
            path: path.to_string(),
            kind: DocKind::Document,
            title: title.to_string(),
            preview: preview.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            size: preview.len(),
        }
    }

    #[test]
    fn test_relevance_floor_and_cap() {
        assert!((relevance(1) - 0.6).abs() < 1e-9);
        assert!((relevance(5) - 1.0).abs() < 1e-9);
        assert!((relevance(50) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_relevance_monotone() {
        let mut prev = 0.0;
        for n in 1..30 {
            let r = relevance(n);
            assert!(r >= prev, "relevance decreased at {} occurrences", n);
            assert!((0.5..=1.0).contains(&r));
            prev = r;
        }
    }

    #[test]
    fn test_blank_query_returns_empty() {
        let entries = vec![entry("a.md", "Alpha", "alpha body")];
        assert!(search_index(&entries, "", 20).unwrap().is_empty());
        assert!(search_index(&entries, "   \t ", 20).unwrap().is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let entries = vec![entry("a.md", "Rust Notes", "Learning RUST daily")];
        let results = search_index(&entries, "rust", 20).unwrap();
        assert_eq!(results.len(), 1);
        // Two occurrences: title and preview
        assert!((results[0].relevance - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let entries = vec![
            entry("a.md", "Langs", "notes on c++ templates"),
            entry("b.md", "Other", "ccc plain text"),
        ];
        let results = search_index(&entries, "c++", 20).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "a.md");
    }

    #[test]
    fn test_sorted_descending_stable_on_ties() {
        let entries = vec![
            entry("one.md", "T", "match"),
            entry("two.md", "T", "match match match"),
            entry("three.md", "T", "match"),
        ];
        let results = search_index(&entries, "match", 20).unwrap();
        assert_eq!(results[0].path, "two.md");
        // Equal scores keep encounter order
        assert_eq!(results[1].path, "one.md");
        assert_eq!(results[2].path, "three.md");
    }

    #[test]
    fn test_truncated_to_final_limit() {
        let entries: Vec<DocumentRecord> = (0..40)
            .map(|i| entry(&format!("{}.md", i), "T", "match"))
            .collect();
        let results = search_index(&entries, "match", 20).unwrap();
        assert_eq!(results.len(), 20);
    }

    #[test]
    fn test_every_result_contains_query() {
        let entries = vec![
            entry("hit.md", "Deploy", "deployment notes"),
            entry("miss.md", "Other", "unrelated text"),
        ];
        let results = search_index(&entries, "deploy", 20).unwrap();
        assert_eq!(results.len(), 1);
        for r in &results {
            let text = format!("{} {}", r.title, r.content).to_lowercase();
            assert!(text.contains("deploy"));
        }
    }

    #[test]
    fn test_snippet_window_clips_to_bounds() {
        let content = "needle at the very start of the content";
        let s = snippet_around(content, 0, 6, 50, 150);
        assert!(s.starts_with("needle"));
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_snippet_window_around_middle_match() {
        let pad = "x".repeat(200);
        let content = format!("{} needle {}", pad, pad);
        let start = content.find("needle").unwrap();
        let s = snippet_around(&content, start, start + 6, 50, 150);
        assert!(s.contains("needle"));
        // 50 before + match + 150 after + ellipsis
        assert!(s.len() <= 50 + 6 + 150 + 3 + 1);
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let content = "日本語のテキスト needle 日本語のテキスト";
        let start = content.find("needle").unwrap();
        // Offsets that would land mid-codepoint must not panic
        let s = snippet_around(content, start, start + 6, 5, 5);
        assert!(s.contains("needle"));
    }

    #[test]
    fn test_snippet_flattens_newlines() {
        let content = "before\nneedle\nafter";
        let start = content.find("needle").unwrap();
        let s = snippet_around(content, start, start + 6, 50, 150);
        assert!(!s.contains('\n'));
    }
}
