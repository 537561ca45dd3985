//! Expansion of persisted history records into transcript messages.
//!
//! The service returns records most-recent-first, each holding one user
//! message, one bot response, and the bot's product links as a JSON-encoded
//! string. Replay needs chronological order and one message per side.

use rakkchat_types::chat::{ChatMessage, HistoryRecord, ProductLink};
use tracing::debug;

/// Decode a record's serialized product links.
///
/// Absent, null, empty, or malformed input yields an empty list; a bad
/// record never fails the whole history load.
pub fn parse_product_links(raw: Option<&str>) -> Vec<ProductLink> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Option<Vec<ProductLink>>>(raw) {
        Ok(links) => links.unwrap_or_default(),
        Err(e) => {
            debug!(error = %e, "Ignoring malformed product links in history record");
            Vec::new()
        }
    }
}

/// Turn most-recent-first records into a chronological message sequence.
///
/// Each record contributes exactly two messages: the user message, then the
/// bot response carrying its links.
pub fn expand_records(records: Vec<HistoryRecord>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(records.len() * 2);
    for record in records.into_iter().rev() {
        let links = parse_product_links(record.product_links.as_deref());
        messages.push(ChatMessage::user(record.user_message));
        messages.push(ChatMessage::bot(record.bot_response, links));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use rakkchat_types::chat::MessageRole;

    fn record(user: &str, bot: &str, links: Option<&str>) -> HistoryRecord {
        HistoryRecord {
            user_message: user.to_string(),
            bot_response: bot.to_string(),
            product_links: links.map(str::to_string),
        }
    }

    #[test]
    fn test_single_record_expands_to_user_then_bot() {
        let messages = expand_records(vec![record("hi", "hello", Some("[]"))]);

        assert_eq!(
            messages,
            vec![
                ChatMessage::user("hi"),
                ChatMessage::bot("hello", Vec::new()),
            ]
        );
    }

    #[test]
    fn test_records_are_replayed_oldest_first() {
        let messages = expand_records(vec![
            record("second question", "second answer", None),
            record("first question", "first answer", None),
        ]);

        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["first question", "first answer", "second question", "second answer"]
        );
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[3].role, MessageRole::Bot);
    }

    #[test]
    fn test_links_attach_to_bot_message_only() {
        let raw = r#"[{"url":"/product_info/1","name":"Jacket A"},{"url":"/product_info/2","name":"Jacket B"}]"#;
        let messages = expand_records(vec![record("jackets?", "Here", Some(raw))]);

        assert!(messages[0].product_links.is_empty());
        assert_eq!(
            messages[1].product_links,
            vec![
                ProductLink::new("/product_info/1", "Jacket A"),
                ProductLink::new("/product_info/2", "Jacket B"),
            ]
        );
    }

    #[test]
    fn test_parse_product_links_degrades_to_empty() {
        assert!(parse_product_links(None).is_empty());
        assert!(parse_product_links(Some("")).is_empty());
        assert!(parse_product_links(Some("null")).is_empty());
        assert!(parse_product_links(Some("not json")).is_empty());
        assert!(parse_product_links(Some(r#"{"url":"/p/1"}"#)).is_empty());
    }

    #[test]
    fn test_malformed_record_does_not_affect_neighbours() {
        let messages = expand_records(vec![
            record("b", "B", Some(r#"[{"url":"/p/2","name":"Two"}]"#)),
            record("a", "A", Some("[broken")),
        ]);

        assert_eq!(messages.len(), 4);
        assert!(messages[1].product_links.is_empty());
        assert_eq!(messages[3].product_links.len(), 1);
    }

    #[test]
    fn test_empty_history() {
        assert!(expand_records(Vec::new()).is_empty());
    }
}
