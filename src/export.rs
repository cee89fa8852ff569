//! Writing conversations to disk.
//!
//! One pretty-printed JSON file per conversation:
//!
//! ```text
//! <dir>/<year>-<season>-<player-a>-<player-b>.json
//! ```

use std::{fs, io, path::PathBuf};

use crate::model::Conversation;

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, ExportError>;

/// Writes conversation files into a directory.
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    /// Creates an exporter writing into `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Writes one conversation, replacing any earlier export of it.
    pub fn write(&self, conversation: &Conversation) -> Result<PathBuf> {
        let path = self.dir.join(file_name(conversation));
        let json = serde_json::to_string_pretty(conversation)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Writes every conversation, returning the paths written.
    pub fn write_all(&self, conversations: &[Conversation]) -> Result<Vec<PathBuf>> {
        let paths = conversations
            .iter()
            .map(|c| self.write(c))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(
            dir = %self.dir.display(),
            files = paths.len(),
            "exported conversations"
        );
        Ok(paths)
    }
}

fn file_name(conversation: &Conversation) -> String {
    format!(
        "{}-{}-{}-{}.json",
        conversation.year,
        slug(conversation.season.as_str()),
        slug(conversation.player_a()),
        slug(conversation.player_b()),
    )
}

/// Lowercase, with each run of non-alphanumerics collapsed to one `-`.
fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
