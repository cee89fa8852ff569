//! Grouping resolved messages into per-season conversations.
//!
//! Grouping needs every message of a game, so it runs only after the
//! whole corpus is parsed.

use std::collections::BTreeMap;

use crate::model::{Conversation, ConversationHalf, ParsedMessage, Season};

/// Group messages by resolved season and unordered player pair.
///
/// Within each conversation, messages keep their input order. Output is
/// sorted by year, season (Spring first), then player names.
pub fn group(messages: &[ParsedMessage]) -> Vec<Conversation> {
    let mut conversations: BTreeMap<(i32, Season, &str, &str), Conversation> = BTreeMap::new();

    for msg in messages {
        let (a, b, forward) = if msg.sender <= msg.recipients {
            (msg.sender.as_str(), msg.recipients.as_str(), true)
        } else {
            (msg.recipients.as_str(), msg.sender.as_str(), false)
        };

        let conversation = conversations
            .entry((msg.resolved_year, msg.resolved_season, a, b))
            .or_insert_with(|| Conversation {
                year: msg.resolved_year,
                season: msg.resolved_season,
                a_to_b: half(a, b),
                b_to_a: half(b, a),
            });

        let side = if forward {
            &mut conversation.a_to_b
        } else {
            &mut conversation.b_to_a
        };
        side.messages.push(msg.body.clone());
    }

    conversations.into_values().collect()
}

fn half(from: &str, to: &str) -> ConversationHalf {
    ConversationHalf {
        from_player: from.to_string(),
        to_player: to.to_string(),
        messages: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::time;

    fn msg(from: &str, to: &str, season: Season, year: i32, body: &str) -> ParsedMessage {
        ParsedMessage {
            sender: from.into(),
            recipients: to.into(),
            nominal_season: season,
            nominal_year: year,
            resolved_season: season,
            resolved_year: year,
            sent_time: time(12, 0, 0, 0),
            body: body.into(),
        }
    }

    #[test]
    fn both_directions_share_a_conversation() {
        let messages = [
            msg("France", "England", Season::Spring, 1901, "bonjour"),
            msg("England", "France", Season::Spring, 1901, "hello"),
            msg("France", "England", Season::Spring, 1901, "encore"),
        ];

        let conversations = group(&messages);
        assert_eq!(conversations.len(), 1);

        let c = &conversations[0];
        assert_eq!(c.player_a(), "England");
        assert_eq!(c.player_b(), "France");
        assert_eq!(c.a_to_b.to_player, "France");
        assert_eq!(c.a_to_b.messages, ["hello"]);
        assert_eq!(c.b_to_a.messages, ["bonjour", "encore"]);
        assert_eq!(c.message_count(), 3);
    }

    #[test]
    fn seasons_are_kept_apart_and_ordered() {
        let messages = [
            msg("Italy", "Austria", Season::Spring, 1902, "c"),
            msg("Italy", "Austria", Season::Fall, 1901, "b"),
            msg("Italy", "Austria", Season::Spring, 1901, "a"),
        ];

        let order: Vec<(i32, Season)> = group(&messages)
            .iter()
            .map(|c| (c.year, c.season))
            .collect();
        assert_eq!(
            order,
            [
                (1901, Season::Spring),
                (1901, Season::Fall),
                (1902, Season::Spring),
            ]
        );
    }

    #[test]
    fn groups_by_resolved_season() {
        let mut late = msg("Russia", "Turkey", Season::Fall, 1901, "late");
        late.resolved_season = Season::Spring;
        late.resolved_year = 1902;

        let conversations = group(&[late]);
        assert_eq!(conversations[0].season, Season::Spring);
        assert_eq!(conversations[0].year, 1902);
    }

    #[test]
    fn distinct_pairs_are_distinct_conversations() {
        let messages = [
            msg("England", "France", Season::Spring, 1901, "x"),
            msg("England", "Germany", Season::Spring, 1901, "y"),
        ];
        let conversations = group(&messages);
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].player_b(), "France");
        assert_eq!(conversations[1].player_b(), "Germany");
    }

    #[test]
    fn no_messages_no_conversations() {
        assert!(group(&[]).is_empty());
    }
}
