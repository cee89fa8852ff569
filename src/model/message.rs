//! Parsed messages.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use super::Season;

/// One message, with headers extracted and its season resolved.
///
/// `resolved_season` and `resolved_year` are what downstream consumers use.
/// The nominal values are kept as stated in the `Date:` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub sender: String,
    pub recipients: String,
    pub nominal_season: Season,
    pub nominal_year: i32,
    pub resolved_season: Season,
    pub resolved_year: i32,
    pub sent_time: Time,
    pub body: String,
}

impl ParsedMessage {
    /// Whether the message was moved into the following phase.
    pub fn was_advanced(&self) -> bool {
        self.resolved_season != self.nominal_season || self.resolved_year != self.nominal_year
    }
}
