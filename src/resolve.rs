//! Phase resolution: which season a message really belongs to.
//!
//! A message dated in an Orders phase but sent after that phase's deadline
//! is traffic for the next phase. Retreats and builds fold into the next
//! season here, so "next phase" means one season forward.

use jiff::civil::Time;

use crate::model::Season;
use crate::schedule::{DeadlineTable, UnresolvedDeadline};

/// Resolve a message's nominal season and year against the deadline table.
///
/// Returns the nominal pair unchanged when the message was sent on time,
/// otherwise the pair exactly one season later.
pub fn resolve(
    season: Season,
    year: i32,
    sent_time: Time,
    body: &str,
    table: &DeadlineTable,
) -> Result<(Season, i32), UnresolvedDeadline> {
    if table.after_deadline(season, year, sent_time, body)? {
        let (next_season, next_year) = season.advance(year);
        tracing::debug!(
            %season,
            year,
            sent = %sent_time.strftime("%H:%M"),
            "message sent after deadline, advancing to {next_season} {next_year}"
        );
        Ok((next_season, next_year))
    } else {
        Ok((season, year))
    }
}
