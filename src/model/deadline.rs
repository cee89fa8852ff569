//! Deadline records: one line of a game's phase schedule.

use std::fmt;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use super::Season;

/// A phase within a season.
///
/// Only `Orders` deadlines take part in phase resolution. Labels the
/// schedule uses that aren't recognized are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    Orders,
    Retreat,
    Builds,
    Other(String),
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Orders => "Orders",
            Self::Retreat => "Retreat",
            Self::Builds => "Builds",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for Phase {
    fn from(label: &str) -> Self {
        match label {
            "Orders" => Self::Orders,
            "Retreat" => Self::Retreat,
            "Builds" => Self::Builds,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Phase {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.as_str().to_string()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The wall-clock cutoff for one phase of one season.
///
/// Deadlines are same-day and phase-local: only the time of day is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineRecord {
    pub season: Season,
    pub year: i32,
    pub phase: Phase,
    pub deadline: Time,
}

impl DeadlineRecord {
    /// Whether this record is the Orders deadline for `(season, year)`.
    pub fn is_orders_for(&self, season: Season, year: i32) -> bool {
        self.season == season && self.year == year && self.phase == Phase::Orders
    }
}

impl fmt::Display for DeadlineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.season,
            self.year,
            self.phase,
            self.deadline.strftime("%H:%M")
        )
    }
}
