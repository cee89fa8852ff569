//! diplog: turn Diplomacy message logs into season-resolved conversations.
//!
//! A message's `Date:` header names the season it was written in, but a
//! message sent after that season's Orders deadline belongs to the next
//! phase. Parsing resolves every message against the game's deadline
//! schedule before grouping messages into per-pair, per-season conversations.

pub mod cache;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod corpus;
pub mod export;
pub mod header;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod schedule;
