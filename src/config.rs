use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::DocKind;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkspaceConfig {
    /// Root of the agent workspace the dashboard reads from.
    pub root: PathBuf,
    /// Directory of dated notes (`YYYY-MM-DD.md`), relative to `root`.
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
    /// Glob patterns selecting note files within `notes_dir`.
    #[serde(default = "default_note_globs")]
    pub note_globs: Vec<String>,
    /// Fixed set of named documents indexed in addition to the notes.
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

/// One `(path, category)` pair from the fixed index list.
#[derive(Debug, Deserialize, Clone)]
pub struct DocumentEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: DocKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory holding the derived JSON snapshots.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_final_limit")]
    pub final_limit: usize,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    #[serde(default = "default_snippet_before")]
    pub snippet_before: usize,
    #[serde(default = "default_snippet_after")]
    pub snippet_after: usize,
    #[serde(default = "default_description_chars")]
    pub description_chars: usize,
    /// How many of the newest dated notes feed the activity feed.
    #[serde(default = "default_recent_days")]
    pub recent_days: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            final_limit: default_final_limit(),
            preview_chars: default_preview_chars(),
            snippet_before: default_snippet_before(),
            snippet_after: default_snippet_after(),
            description_chars: default_description_chars(),
            recent_days: default_recent_days(),
        }
    }
}

fn default_notes_dir() -> String {
    "memory".to_string()
}
fn default_note_globs() -> Vec<String> {
    vec!["*.md".to_string()]
}
fn default_final_limit() -> usize {
    20
}
fn default_preview_chars() -> usize {
    300
}
fn default_snippet_before() -> usize {
    50
}
fn default_snippet_after() -> usize {
    150
}
fn default_description_chars() -> usize {
    150
}
fn default_recent_days() -> usize {
    7
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl Config {
    /// Absolute path of the dated-notes directory.
    pub fn notes_path(&self) -> PathBuf {
        self.workspace.root.join(&self.workspace.notes_dir)
    }

    /// Path of a snapshot file inside the data directory.
    pub fn data_path(&self, file: &str) -> PathBuf {
        self.data.dir.join(file)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.retrieval.final_limit < 1 {
        anyhow::bail!("retrieval.final_limit must be >= 1");
    }

    if config.retrieval.preview_chars == 0 {
        anyhow::bail!("retrieval.preview_chars must be > 0");
    }

    if config.retrieval.recent_days == 0 {
        anyhow::bail!("retrieval.recent_days must be >= 1");
    }

    Ok(config)
}
