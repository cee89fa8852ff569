//! Conversations: every message two players exchanged in one season.

use serde::{Deserialize, Serialize};

use super::Season;

/// Messages sent in one direction between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHalf {
    pub from_player: String,
    pub to_player: String,
    pub messages: Vec<String>,
}

/// Both directions of a player pair's traffic for one resolved season.
///
/// `a_to_b.from_player` sorts no later than `b_to_a.from_player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub year: i32,
    pub season: Season,
    pub a_to_b: ConversationHalf,
    pub b_to_a: ConversationHalf,
}

impl Conversation {
    pub fn player_a(&self) -> &str {
        &self.a_to_b.from_player
    }

    pub fn player_b(&self) -> &str {
        &self.b_to_a.from_player
    }

    pub fn message_count(&self) -> usize {
        self.a_to_b.messages.len() + self.b_to_a.messages.len()
    }
}
