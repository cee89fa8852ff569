//! The deadline table: a game's phase schedule, loaded once per run.
//!
//! The schedule is the game-history export, one record per line:
//!
//! ```text
//! <season> <year> <phase> <weekday> <month> <day> <HH:MM> <year> <timezone>
//! Fall 1904 Orders Mon Oct 7 16:45 1904 UTC
//! ```
//!
//! Some exports put the calendar year before the time; both orders are
//! read. The export contains two lines that aren't records (`Winter 1900`
//! and `Fall 1905 Retreat`); those, blank lines, and lines for seasons
//! without an Orders phase (Winter builds) are skipped.

use std::{fs, io, path::Path, path::PathBuf};

use jiff::civil::Time;

use crate::model::{DeadlineRecord, Phase, Season, parse_year};
use crate::parse::split_lines;

/// Lines in the export that are not deadline records.
const IGNORED_LINES: [&str; 2] = ["Winter 1900", "Fall 1905 Retreat"];

/// Whitespace-separated tokens in one record line.
const RECORD_TOKENS: usize = 9;

/// Bodies shorter than this, sent in the deadline minute, count as late.
pub const SHORT_MESSAGE_CHARS: usize = 50;

/// Errors that can occur while loading a schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("failed to read schedule {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed schedule line {line} ({reason}): {content:?}")]
    Malformed {
        line: usize,
        content: String,
        reason: String,
    },
}

pub type Result<T> = core::result::Result<T, ScheduleError>;

/// A `(season, year)` pair with no Orders deadline in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no Orders deadline for {season} {year}")]
pub struct UnresolvedDeadline {
    pub season: Season,
    pub year: i32,
}

/// Immutable, ordered deadline records.
#[derive(Debug, Clone, Default)]
pub struct DeadlineTable {
    records: Vec<DeadlineRecord>,
}

impl DeadlineTable {
    pub fn from_records(records: Vec<DeadlineRecord>) -> Self {
        Self { records }
    }

    /// Load a schedule file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&contents)?;
        tracing::info!(
            path = %path.display(),
            records = table.records.len(),
            "loaded schedule"
        );
        Ok(table)
    }

    /// Parse schedule text, keeping records in file order.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut records = Vec::new();
        for (index, line) in split_lines(contents).enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || IGNORED_LINES.contains(&trimmed) {
                continue;
            }
            if let Some(record) = parse_record(index + 1, trimmed)? {
                records.push(record);
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[DeadlineRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first Orders record for `(season, year)`, in file order.
    pub fn orders_deadline(&self, season: Season, year: i32) -> Option<&DeadlineRecord> {
        self.records.iter().find(|r| r.is_orders_for(season, year))
    }

    /// Whether a message sent at `time` falls after the Orders deadline of
    /// `(season, year)`.
    ///
    /// A message sent in the deadline minute itself is ambiguous. Short
    /// bodies (under [`SHORT_MESSAGE_CHARS`]) were likely written at the
    /// boundary and count as late; longer ones were likely composed before
    /// it and count as on time. This is a heuristic.
    pub fn after_deadline(
        &self,
        season: Season,
        year: i32,
        time: Time,
        body: &str,
    ) -> core::result::Result<bool, UnresolvedDeadline> {
        let record = self
            .orders_deadline(season, year)
            .ok_or(UnresolvedDeadline { season, year })?;

        Ok(match time.cmp(&record.deadline) {
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => body.chars().count() < SHORT_MESSAGE_CHARS,
            std::cmp::Ordering::Greater => true,
        })
    }
}

fn parse_record(line: usize, content: &str) -> Result<Option<DeadlineRecord>> {
    let malformed = |reason: String| ScheduleError::Malformed {
        line,
        content: content.to_string(),
        reason,
    };

    let tokens: Vec<&str> = content.split_whitespace().collect();
    let [season, year, phase, _weekday, _month, day, first, second, _timezone] = tokens[..] else {
        return Err(malformed(format!(
            "expected {RECORD_TOKENS} fields, found {}",
            tokens.len()
        )));
    };

    // Builds and adjustments fall in Winter; they have no Orders deadline
    // to consult, so they are not records.
    let Ok(season) = season.parse::<Season>() else {
        tracing::debug!(line, season, phase, "skipping non-move season");
        return Ok(None);
    };
    let year = parse_year(year).ok_or_else(|| malformed(format!("invalid year '{year}'")))?;
    if day.parse::<u8>().is_err() {
        return Err(malformed(format!("invalid day '{day}'")));
    }

    // The clock time sits on either side of the calendar year.
    let (time, calendar_year) = if first.contains(':') {
        (first, second)
    } else {
        (second, first)
    };
    if calendar_year.parse::<u16>().is_err() {
        return Err(malformed(format!("invalid calendar year '{calendar_year}'")));
    }
    let deadline = parse_clock(time).ok_or_else(|| malformed(format!("invalid time '{time}'")))?;

    Ok(Some(DeadlineRecord {
        season,
        year,
        phase: Phase::from(phase),
        deadline,
    }))
}

/// Parse a 24-hour `HH:MM` token.
pub(crate) fn parse_clock(token: &str) -> Option<Time> {
    Time::strptime("%H:%M", token).ok()
}
