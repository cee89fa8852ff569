//! Corpus walking: find message logs, split them into blocks, parse each.
//!
//! Log files hold messages separated by lines of `=` characters. Every
//! block is parsed independently against the same deadline table, so the
//! only shared state is the table itself.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};

use crate::model::ParsedMessage;
use crate::parse::{ParseError, parse, split_lines};
use crate::schedule::DeadlineTable;

/// A line starting with this ends the current block.
const SEPARATOR: &str = "=============";

/// What to do when a block fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first bad block.
    #[default]
    Abort,
    /// Record the bad block and keep going.
    Skip,
}

/// Errors that can occur while walking a corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: block {block}: {source}", path.display())]
    Parse {
        path: PathBuf,
        block: usize,
        #[source]
        source: ParseError,
    },
}

pub type Result<T> = core::result::Result<T, CorpusError>;

/// One message's raw text and its position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// 0-based index among the file's separator-delimited segments.
    pub index: usize,
    pub text: String,
}

/// A block that failed to parse under [`FailurePolicy::Skip`].
#[derive(Debug, Clone)]
pub struct SkippedBlock {
    pub path: PathBuf,
    pub block: usize,
    pub error: ParseError,
}

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Log file extension, without the dot.
    pub extension: String,
    pub policy: FailurePolicy,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            policy: FailurePolicy::Abort,
        }
    }
}

/// Everything a walk produced.
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    pub files: usize,
    pub messages: Vec<ParsedMessage>,
    pub skipped: Vec<SkippedBlock>,
}

/// Find log files under `root`, recursively, in walk order with each
/// directory's entries sorted by name.
///
/// Every file is seen: ignore files and dotfile rules don't apply.
pub fn discover(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(Ord::cmp)
        .build();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| CorpusError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && entry.path().extension().is_some_and(|e| e == extension) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// Split a log file into message blocks.
///
/// Whitespace-only segments are dropped but still counted, so a block's
/// index matches its position between separators. A final segment with no
/// closing separator is kept.
pub fn split_blocks(text: &str) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut index = 0;

    for line in split_lines(text) {
        if line.starts_with(SEPARATOR) {
            push_block(&mut blocks, index, &mut current);
            index += 1;
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    push_block(&mut blocks, index, &mut current);

    blocks
}

fn push_block(blocks: &mut Vec<RawBlock>, index: usize, current: &mut String) {
    let text = std::mem::take(current);
    if !text.trim().is_empty() {
        blocks.push(RawBlock { index, text });
    }
}

/// Parse every message under `root`.
///
/// Unreadable files always abort. Bad blocks abort or are skipped
/// according to `options.policy`.
pub fn walk(root: &Path, table: &DeadlineTable, options: &WalkOptions) -> Result<CorpusReport> {
    let paths = discover(root, &options.extension)?;
    tracing::info!(root = %root.display(), files = paths.len(), "discovered message logs");

    let mut report = CorpusReport {
        files: paths.len(),
        ..CorpusReport::default()
    };

    for path in paths {
        let text = fs::read_to_string(&path).map_err(|source| CorpusError::Read {
            path: path.clone(),
            source,
        })?;

        for block in split_blocks(&text) {
            match parse(&block.text, table) {
                Ok(message) => report.messages.push(message),
                Err(error) => match options.policy {
                    FailurePolicy::Abort => {
                        return Err(CorpusError::Parse {
                            path,
                            block: block.index,
                            source: error,
                        });
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!(
                            path = %path.display(),
                            block = block.index,
                            %error,
                            "skipping block"
                        );
                        report.skipped.push(SkippedBlock {
                            path: path.clone(),
                            block: block.index,
                            error,
                        });
                    }
                },
            }
        }
    }

    Ok(report)
}
