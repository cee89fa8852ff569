//! Core data model for diplog.
//!
//! These types describe a game's deadline schedule, the messages players
//! exchanged, and the per-season conversations built from them.

mod conversation;
mod deadline;
mod message;
mod season;

pub use conversation::{Conversation, ConversationHalf};
pub use deadline::{DeadlineRecord, Phase};
pub use message::ParsedMessage;
pub use season::{MAX_YEAR, Season, UnknownSeason, parse_year};
