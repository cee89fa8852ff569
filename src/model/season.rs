//! Seasons: the two move phases of a game year.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Largest game year accepted from input, so advancing a year never overflows.
pub const MAX_YEAR: i32 = 9999;

/// Parse a game-year token in `0..=MAX_YEAR`.
pub fn parse_year(token: &str) -> Option<i32> {
    token
        .parse::<i32>()
        .ok()
        .filter(|year| (0..=MAX_YEAR).contains(year))
}

/// A move season. Spring sorts before Fall within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Fall,
}

impl Season {
    /// The season and year one phase after `(self, year)`.
    ///
    /// Spring advances to Fall of the same year; Fall advances to Spring of
    /// the following year. Years come from [`parse_year`], so the increment
    /// stays in range.
    pub fn advance(self, year: i32) -> (Self, i32) {
        match self {
            Self::Spring => (Self::Fall, year),
            Self::Fall => (Self::Spring, year + 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token that does not name a move season.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown season '{0}' (expected Spring or Fall)")]
pub struct UnknownSeason(pub String);

impl FromStr for Season {
    type Err = UnknownSeason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("spring") {
            Ok(Self::Spring)
        } else if s.eq_ignore_ascii_case("fall") {
            Ok(Self::Fall)
        } else {
            Err(UnknownSeason(s.to_string()))
        }
    }
}
