//! Message parsing: raw block in, resolved message out.
//!
//! A raw block looks like:
//!
//! ```text
//! From: ENGLAND
//! Date: Mon Oct 7 16:53 1904 Fall 1904
//! CC: france
//! Shall we talk about Belgium?
//! ```
//!
//! Headers are matched case-insensitively by prefix; the first match wins.
//! Everything after the `CC:` line is the body. Parsing is pure: errors are
//! returned to the caller, which decides whether to skip or abort.

use crate::header::{HeaderLineParser, PlayDiplomacyHeaders};
use crate::model::ParsedMessage;
use crate::resolve::resolve;
use crate::schedule::{DeadlineTable, UnresolvedDeadline};

/// A block that doesn't have the expected header layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedMessage {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("no time token in date header {line:?}")]
    MissingTime { line: String },

    #[error("invalid time '{token}' in date header (expected HH:MM)")]
    InvalidTime { token: String },

    #[error("invalid season '{token}' in date header")]
    InvalidSeason { token: String },

    #[error("invalid year '{token}' in date header")]
    InvalidYear { token: String },
}

/// Errors that can occur while parsing one message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed message: {0}")]
    Malformed(#[from] MalformedMessage),

    #[error(transparent)]
    Unresolved(#[from] UnresolvedDeadline),
}

const FROM: &str = "From:";
const DATE: &str = "Date:";
const CC: &str = "CC:";

/// Parse a playdiplomacy.com message block.
pub fn parse(raw: &str, table: &DeadlineTable) -> Result<ParsedMessage, ParseError> {
    parse_with(&PlayDiplomacyHeaders, raw, table)
}

/// Parse a message block using the given header format.
pub fn parse_with<H: HeaderLineParser + ?Sized>(
    headers: &H,
    raw: &str,
    table: &DeadlineTable,
) -> Result<ParsedMessage, ParseError> {
    let lines: Vec<&str> = split_lines(raw).collect();

    let (_, from) = find_header(&lines, FROM).ok_or(MalformedMessage::MissingHeader(FROM))?;
    let (date_index, _) =
        find_header(&lines, DATE).ok_or(MalformedMessage::MissingHeader(DATE))?;
    let (cc_index, cc) = find_header(&lines, CC).ok_or(MalformedMessage::MissingHeader(CC))?;

    let date = headers.parse_date(lines[date_index])?;
    let body = lines[cc_index + 1..].join("\n").trim().to_string();

    let (resolved_season, resolved_year) =
        resolve(date.season, date.year, date.sent_time, &body, table)?;

    Ok(ParsedMessage {
        sender: title_case(from.trim()),
        recipients: title_case(cc.trim()),
        nominal_season: date.season,
        nominal_year: date.year,
        resolved_season,
        resolved_year,
        sent_time: date.sent_time,
        body,
    })
}

/// Split on any line terminator: `\n`, `\r\n`, or a lone `\r`.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split('\r'))
}

/// Find the first line starting with `prefix` (ASCII case-insensitive).
///
/// Returns the line's index and the text after the prefix.
fn find_header<'a>(lines: &[&'a str], prefix: &str) -> Option<(usize, &'a str)> {
    lines.iter().copied().enumerate().find_map(|(i, line)| {
        let head = line.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| (i, &line[prefix.len()..]))
    })
}

/// Lowercase everything, then capitalize each letter that follows a
/// non-letter: `"ENGLAND, france"` becomes `"England, France"`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::time;

    use crate::model::Season;

    fn table() -> DeadlineTable {
        DeadlineTable::parse(
            "Fall 1904 Orders Mon Oct 7 16:45 1904 UTC\n\
             Spring 1905 Orders Mon Mar 3 12:00 1905 UTC\n",
        )
        .unwrap()
    }

    fn block(date: &str, body: &str) -> String {
        format!("From: ENGLAND\nDate: {date}\nCC: france\n{body}\n")
    }

    #[test]
    fn extracts_headers_and_body() {
        let raw = block("Mon Oct 7 10:15 1904 Fall 1904", "\n  Shall we talk?\nAbout Belgium.  \n");
        let msg = parse(&raw, &table()).unwrap();

        assert_eq!(msg.sender, "England");
        assert_eq!(msg.recipients, "France");
        assert_eq!(msg.nominal_season, Season::Fall);
        assert_eq!(msg.nominal_year, 1904);
        assert_eq!(msg.resolved_season, Season::Fall);
        assert_eq!(msg.resolved_year, 1904);
        assert_eq!(msg.sent_time, time(10, 15, 0, 0));
        assert_eq!(msg.body, "Shall we talk?\nAbout Belgium.");
        assert!(!msg.was_advanced());
    }

    #[test]
    fn late_long_message_moves_to_next_spring() {
        let body = "a".repeat(80);
        let raw = block("Mon Oct 7 16:53 1904 Fall 1904", &body);
        let msg = parse(&raw, &table()).unwrap();

        assert_eq!(msg.nominal_season, Season::Fall);
        assert_eq!(msg.nominal_year, 1904);
        assert_eq!((msg.resolved_season, msg.resolved_year), (Season::Spring, 1905));
        assert!(msg.was_advanced());
    }

    #[test]
    fn short_message_at_deadline_moves_forward() {
        let raw = block("Mon Oct 7 16:45 1904 Fall 1904", "ok");
        let msg = parse(&raw, &table()).unwrap();
        assert_eq!((msg.resolved_season, msg.resolved_year), (Season::Spring, 1905));
    }

    #[test]
    fn tie_break_uses_trimmed_body() {
        // 49 characters of text padded with whitespace is still short.
        let body = format!("   {}   ", "b".repeat(49));
        let raw = block("Mon Oct 7 16:45 1904 Fall 1904", &body);
        let msg = parse(&raw, &table()).unwrap();
        assert!(msg.was_advanced());
    }

    #[test]
    fn headers_match_case_insensitively() {
        let raw = "FROM: italy\ndate: Mon Oct 7 09:00 1904 Fall 1904\ncc: AUSTRIA\nhi";
        let msg = parse(raw, &table()).unwrap();
        assert_eq!(msg.sender, "Italy");
        assert_eq!(msg.recipients, "Austria");
        assert_eq!(msg.body, "hi");
    }

    #[test]
    fn header_lines_after_cc_belong_to_body() {
        let raw = "From: Italy\nDate: Mon Oct 7 09:00 1904 Fall 1904\nCC: Austria\nFrom: a quote\nDate: whenever";
        let msg = parse(raw, &table()).unwrap();
        assert_eq!(msg.body, "From: a quote\nDate: whenever");
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let raw = "From: Italy\r\nDate: Mon Oct 7 09:00 1904 Fall 1904\r\nCC: Austria\r\nline one\r\nline two\r\n";
        let msg = parse(raw, &table()).unwrap();
        assert_eq!(msg.recipients, "Austria");
        assert_eq!(msg.body, "line one\nline two");
    }

    #[test]
    fn accepts_bare_carriage_returns() {
        let raw = "From: Italy\rDate: Mon Oct 7 09:00 1904 Fall 1904\rCC: Austria\rline one\rline two\r";
        let msg = parse(raw, &table()).unwrap();
        assert_eq!(msg.sender, "Italy");
        assert_eq!(msg.recipients, "Austria");
        assert_eq!(msg.body, "line one\nline two");
    }

    #[test]
    fn missing_cc_is_malformed() {
        let raw = "From: Italy\nDate: Mon Oct 7 09:00 1904 Fall 1904\nhello";
        let err = parse(raw, &table()).unwrap_err();
        assert_eq!(err, ParseError::Malformed(MalformedMessage::MissingHeader("CC:")));
    }

    #[test]
    fn missing_from_is_malformed() {
        let raw = "Date: Mon Oct 7 09:00 1904 Fall 1904\nCC: Austria\nhello";
        let err = parse(raw, &table()).unwrap_err();
        assert_eq!(err, ParseError::Malformed(MalformedMessage::MissingHeader("From:")));
    }

    #[test]
    fn missing_date_is_malformed() {
        let raw = "From: Italy\nCC: Austria\nhello";
        let err = parse(raw, &table()).unwrap_err();
        assert_eq!(err, ParseError::Malformed(MalformedMessage::MissingHeader("Date:")));
    }

    #[test]
    fn bad_time_token_is_malformed() {
        let raw = block("Mon Oct 7 4pm 1904 Fall 1904", "hi");
        let err = parse(&raw, &table()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Malformed(MalformedMessage::InvalidTime { .. })
        ));
    }

    #[test]
    fn unknown_phase_is_unresolved() {
        let raw = block("Mon Oct 7 09:00 1901 Spring 1901", "hi");
        let err = parse(&raw, &table()).unwrap_err();
        assert!(matches!(err, ParseError::Unresolved(_)));
    }

    #[test]
    fn reparsing_is_idempotent() {
        let raw = block("Mon Oct 7 16:45 1904 Fall 1904", "same block, parsed twice");
        let table = table();
        assert_eq!(parse(&raw, &table).unwrap(), parse(&raw, &table).unwrap());
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("ENGLAND, france"), "England, France");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("player2x"), "Player2X");
    }
}
