//! CLI interface for diplog.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//! Data goes to stdout; logs and summaries go to stderr.
//!
//! - `diplog schedule <file>` — show a deadline table.
//! - `diplog parse <dir>` — parse every message, print JSON.
//! - `diplog export <dir> --out <dir>` — write one file per conversation.
//! - `diplog resolve <season> <year> <time>` — resolve a single message.

mod format;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::conversation;
use crate::corpus::{self, CorpusReport, FailurePolicy, WalkOptions};
use crate::export::Exporter;
use crate::model::Season;
use crate::resolve::resolve;
use crate::schedule::{DeadlineTable, parse_clock};

use format::{format_record, format_resolution, format_skipped};

/// diplog — parse Diplomacy message logs into season-resolved conversations.
#[derive(Debug, Parser)]
#[command(name = "diplog", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: one game
  1. Save the game history page as history.txt
  2. diplog schedule history.txt
  3. diplog parse messages/ --schedule history.txt > messages.json
  4. diplog export messages/ --schedule history.txt --out conversations/

Check a single message:
  diplog resolve --schedule history.txt Fall 1904 16:45 --body 'ok'";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a schedule file and print its deadline records.
    Schedule {
        /// Game history file.
        file: PathBuf,
    },

    /// Parse every message under a directory and print them as JSON.
    Parse {
        /// Directory of message logs, walked recursively.
        dir: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Parse, group into conversations, and write one JSON file each.
    Export {
        /// Directory of message logs, walked recursively.
        dir: PathBuf,

        /// Directory to write conversation files into.
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Resolve the season a single message belongs to.
    Resolve {
        /// Game history file.
        #[arg(long)]
        schedule: Option<PathBuf>,

        /// Season from the message's date header.
        season: Season,

        /// Year from the message's date header.
        year: i32,

        /// Send time, `HH:MM`.
        time: String,

        /// Message body; its length decides exact-deadline ties.
        #[arg(long, default_value = "")]
        body: String,
    },
}

/// Options shared by commands that walk a corpus.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Game history file (defaults to `schedule` in the config).
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Message log extension, without the dot.
    #[arg(long)]
    extension: Option<String>,

    /// Skip blocks that fail to parse instead of stopping.
    #[arg(long)]
    skip_malformed: bool,
}

/// Run a parsed command line, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    match cli.command {
        Command::Schedule { file } => cmd_schedule(&file),
        Command::Parse { dir, input } => cmd_parse(config, &dir, &input),
        Command::Export { dir, out, input } => cmd_export(config, &dir, &out, &input),
        Command::Resolve {
            schedule,
            season,
            year,
            time,
            body,
        } => {
            let table = load_table(config, schedule.as_deref())?;
            cmd_resolve(&table, season, year, &time, &body)
        }
    }
}

fn cmd_schedule(file: &Path) -> Result<(), String> {
    let table = DeadlineTable::load(file).map_err(|e| e.to_string())?;
    for record in table.records() {
        println!("{}", format_record(record));
    }
    Ok(())
}

fn cmd_parse(config: &Config, dir: &Path, input: &InputArgs) -> Result<(), String> {
    let report = walk_corpus(config, dir, input)?;

    let json = serde_json::to_string_pretty(&report.messages)
        .map_err(|e| format!("failed to serialize messages: {e}"))?;
    println!("{json}");

    Ok(())
}

fn cmd_export(config: &Config, dir: &Path, out: &Path, input: &InputArgs) -> Result<(), String> {
    let report = walk_corpus(config, dir, input)?;
    let conversations = conversation::group(&report.messages);

    let exporter = Exporter::new(out).map_err(|e| format!("failed to export: {e}"))?;
    let paths = exporter
        .write_all(&conversations)
        .map_err(|e| format!("failed to export: {e}"))?;

    eprintln!(
        "Exported {} conversation(s) from {} message(s) → {}",
        paths.len(),
        report.messages.len(),
        out.display()
    );
    Ok(())
}

fn cmd_resolve(
    table: &DeadlineTable,
    season: Season,
    year: i32,
    time: &str,
    body: &str,
) -> Result<(), String> {
    let sent = parse_clock(time).ok_or_else(|| format!("invalid time '{time}' (expected HH:MM)"))?;
    let resolved = resolve(season, year, sent, body, table).map_err(|e| e.to_string())?;
    println!("{}", format_resolution((season, year), resolved));
    Ok(())
}

/// Load the schedule and walk the corpus, reporting any skipped blocks.
fn walk_corpus(config: &Config, dir: &Path, input: &InputArgs) -> Result<CorpusReport, String> {
    let table = load_table(config, input.schedule.as_deref())?;

    let options = WalkOptions {
        extension: input
            .extension
            .clone()
            .unwrap_or_else(|| config.extension.clone()),
        policy: if input.skip_malformed {
            FailurePolicy::Skip
        } else {
            config.on_error
        },
    };

    let report = corpus::walk(dir, &table, &options).map_err(|e| e.to_string())?;

    for skipped in &report.skipped {
        eprintln!("Skipped {}", format_skipped(skipped));
    }
    Ok(report)
}

/// Load the deadline table from the flag, falling back to the config.
fn load_table(config: &Config, schedule: Option<&Path>) -> Result<DeadlineTable, String> {
    let path = schedule
        .or(config.schedule.as_deref())
        .ok_or("no schedule given: pass --schedule <file> or set `schedule` in the config")?;
    DeadlineTable::load(path).map_err(|e| e.to_string())
}
