//! Header-line formats.
//!
//! The `Date:` header is read by fixed token position, which ties parsing
//! to one export format. Each known format is a [`HeaderLineParser`]; the
//! message parser is generic over it.

use jiff::civil::Time;

use crate::model::{Season, parse_year};
use crate::parse::MalformedMessage;
use crate::schedule::parse_clock;

/// What a `Date:` header says about when a message was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateHeader {
    pub season: Season,
    pub year: i32,
    pub sent_time: Time,
}

/// Parses the format-specific parts of a message's headers.
pub trait HeaderLineParser {
    /// Parse a full `Date:` line, prefix included.
    fn parse_date(&self, line: &str) -> Result<DateHeader, MalformedMessage>;
}

/// The playdiplomacy.com export format.
///
/// ```text
/// Date: Mon Oct 7 16:53 1904 Fall 1904
/// ```
///
/// Tokens are whitespace-separated over the whole line: the time is the
/// fifth token, the season the second-to-last, the year the last.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayDiplomacyHeaders;

const TIME_TOKEN: usize = 4;

impl HeaderLineParser for PlayDiplomacyHeaders {
    fn parse_date(&self, line: &str) -> Result<DateHeader, MalformedMessage> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let Some(&time) = tokens.get(TIME_TOKEN) else {
            return Err(MalformedMessage::MissingTime {
                line: line.to_string(),
            });
        };
        let sent_time = parse_clock(time).ok_or_else(|| MalformedMessage::InvalidTime {
            token: time.to_string(),
        })?;

        // At least five tokens exist, so both of these are present.
        let year_token = tokens[tokens.len() - 1];
        let season_token = tokens[tokens.len() - 2];

        let season = season_token
            .parse()
            .map_err(|_| MalformedMessage::InvalidSeason {
                token: season_token.to_string(),
            })?;
        let year = parse_year(year_token).ok_or_else(|| MalformedMessage::InvalidYear {
            token: year_token.to_string(),
        })?;

        Ok(DateHeader {
            season,
            year,
            sent_time,
        })
    }
}
