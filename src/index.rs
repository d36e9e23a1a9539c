//! Content index builder.
//!
//! Scans the fixed document list plus the dated-notes directory and produces
//! one [`DocumentRecord`] per existing, readable file. The whole index is
//! recreated on every sync; a file missing from the scan simply disappears
//! from the next snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::config::Config;
use crate::models::{DocKind, DocumentRecord};
use crate::notes;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)").expect("valid heading pattern"));

static PATH_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date pattern"));

/// Build the full content index: fixed documents first (in config order),
/// then every note file sorted by name. Missing or unreadable files are
/// skipped without surfacing an error.
pub fn build_index(config: &Config) -> Vec<DocumentRecord> {
    let mut index = Vec::new();
    let root = &config.workspace.root;
    let preview_chars = config.retrieval.preview_chars;

    for entry in &config.workspace.documents {
        let full_path = root.join(&entry.path);
        match std::fs::read_to_string(&full_path) {
            Ok(content) => {
                index.push(document_record(
                    &entry.path,
                    entry.kind,
                    &content,
                    &full_path,
                    preview_chars,
                ));
            }
            Err(err) => {
                debug!(path = %full_path.display(), %err, "skipping unreadable document");
            }
        }
    }

    let note_files = notes::list_note_files(&config.notes_path(), &config.workspace.note_globs)
        .unwrap_or_default();
    for path in note_files {
        let Ok(content) = std::fs::read_to_string(&path) else {
            debug!(path = %path.display(), "skipping unreadable note");
            continue;
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let rel = format!("{}/{}", config.workspace.notes_dir, name);
        index.push(document_record(
            &rel,
            DocKind::Memory,
            &content,
            &path,
            preview_chars,
        ));
    }

    index
}

fn document_record(
    rel_path: &str,
    kind: DocKind,
    content: &str,
    fs_path: &Path,
    preview_chars: usize,
) -> DocumentRecord {
    let title = extract_title(content).unwrap_or_else(|| file_stem(rel_path));

    DocumentRecord {
        path: rel_path.to_string(),
        kind,
        title,
        preview: preview(content, preview_chars),
        date: doc_date(rel_path, fs_path),
        size: content.len(),
    }
}

/// Title from the first `# heading` line, if any.
pub fn extract_title(content: &str) -> Option<String> {
    HEADING_RE
        .captures(content)
        .map(|c| c[1].trim().to_string())
}

/// Filename without extension, used as the title fallback.
pub fn file_stem(rel_path: &str) -> String {
    Path::new(rel_path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| rel_path.to_string())
}

/// First `max_chars` characters with newlines flattened to spaces and a
/// trailing ellipsis. The ellipsis is appended even when the content is
/// shorter than the cutoff; consumers rely on the marker being present.
pub fn preview(content: &str, max_chars: usize) -> String {
    let head: String = content.chars().take(max_chars).collect();
    let mut flat = head.replace('\n', " ").trim().to_string();
    flat.push_str("...");
    flat
}

/// Calendar date for a document: a `YYYY-MM-DD` embedded in the relative
/// path wins; otherwise the file's modification time truncated to a date.
pub fn doc_date(rel_path: &str, fs_path: &Path) -> NaiveDate {
    if let Some(m) = PATH_DATE_RE.find(rel_path) {
        if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d") {
            return date;
        }
    }
    mtime_date(fs_path)
}

fn mtime_date(path: &Path) -> NaiveDate {
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
    DateTime::<Utc>::from(modified).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_title_from_first_heading() {
        let content = "# My Title\n\nSome body text.";
        assert_eq!(extract_title(content), Some("My Title".to_string()));
    }

    #[test]
    fn test_title_heading_not_on_first_line() {
        let content = "preamble\n# Later Heading\nbody";
        assert_eq!(extract_title(content), Some("Later Heading".to_string()));
    }

    #[test]
    fn test_no_heading_falls_back_to_stem() {
        assert_eq!(extract_title("no headings here"), None);
        assert_eq!(file_stem("memory/2026-01-05.md"), "2026-01-05");
        assert_eq!(file_stem("TOOLS.md"), "TOOLS");
    }

    #[test]
    fn test_subheading_is_not_a_title() {
        // `##` does not match the single-`#` heading rule
        let content = "## Section\nbody";
        assert_eq!(extract_title(content), None);
    }

    #[test]
    fn test_preview_flattens_and_appends_ellipsis() {
        let p = preview("line one\nline two", 300);
        assert_eq!(p, "line one line two...");
    }

    #[test]
    fn test_preview_truncates_at_char_budget() {
        let long = "x".repeat(500);
        let p = preview(&long, 300);
        assert_eq!(p.len(), 303);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_preview_ellipsis_even_when_short() {
        assert_eq!(preview("hi", 300), "hi...");
    }

    #[test]
    fn test_date_from_path_wins_over_mtime() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("2026-01-05.md");
        fs::write(&file, "note").unwrap();
        let date = doc_date("memory/2026-01-05.md", &file);
        assert_eq!(date.to_string(), "2026-01-05");
    }

    #[test]
    fn test_date_falls_back_to_mtime() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("TOOLS.md");
        fs::write(&file, "tools").unwrap();
        let date = doc_date("TOOLS.md", &file);
        assert_eq!(date, chrono::Utc::now().date_naive());
    }

    fn test_config(root: &Path) -> Config {
        use crate::config::*;
        Config {
            workspace: WorkspaceConfig {
                root: root.to_path_buf(),
                notes_dir: "memory".to_string(),
                note_globs: vec!["*.md".to_string()],
                documents: vec![
                    DocumentEntry {
                        path: "MEMORY.md".to_string(),
                        kind: DocKind::Memory,
                    },
                    DocumentEntry {
                        path: "TOOLS.md".to_string(),
                        kind: DocKind::Document,
                    },
                    DocumentEntry {
                        path: "missing.md".to_string(),
                        kind: DocKind::Document,
                    },
                ],
            },
            data: DataConfig {
                dir: root.join("data"),
            },
            retrieval: RetrievalConfig::default(),
            server: ServerConfig {
                bind: "127.0.0.1:0".to_string(),
            },
        }
    }

    #[test]
    fn test_build_index_skips_missing_and_includes_notes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("MEMORY.md"), "# Long Term Memory\nfacts").unwrap();
        fs::write(tmp.path().join("TOOLS.md"), "no heading").unwrap();
        let mem = tmp.path().join("memory");
        fs::create_dir(&mem).unwrap();
        fs::write(mem.join("2026-01-05.md"), "# Daily Log\nDid things.").unwrap();

        let index = build_index(&test_config(tmp.path()));
        let paths: Vec<&str> = index.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["MEMORY.md", "TOOLS.md", "memory/2026-01-05.md"]);

        assert_eq!(index[0].title, "Long Term Memory");
        assert_eq!(index[1].title, "TOOLS");
        assert_eq!(index[2].kind, DocKind::Memory);
        assert_eq!(index[2].date.to_string(), "2026-01-05");
        assert_eq!(index[1].size, "no heading".len());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("MEMORY.md"), "# M\nbody").unwrap();
        fs::write(tmp.path().join("TOOLS.md"), "# T\nbody").unwrap();

        let cfg = test_config(tmp.path());
        assert_eq!(build_index(&cfg), build_index(&cfg));
    }
}
