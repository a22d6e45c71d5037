//! Sender grouping and conversion statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::{MediaClassifier, MediaCounts};
use crate::Message;

/// A maximal contiguous run of messages from one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderGroup {
    pub sender: String,
    pub messages: Vec<Message>,
}

impl SenderGroup {
    fn start(message: Message) -> Self {
        Self {
            sender: message.sender.clone(),
            messages: vec![message],
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.messages.first().map(|m| m.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.timestamp)
    }
}

/// Splits a conversation into runs of equal sender.
///
/// Runs from the same sender separated by someone else stay separate
/// groups, so chronological order is preserved.
///
/// # Example
/// Input:  [("Alice", "Hi"), ("Alice", "How are you?"), ("Bob", "Fine"), ("Alice", "Good")]
/// Output: [Alice: 2 messages, Bob: 1 message, Alice: 1 message]
pub fn group_by_sender(messages: Vec<Message>) -> Vec<SenderGroup> {
    let mut groups: Vec<SenderGroup> = Vec::new();

    for msg in messages {
        match groups.last_mut() {
            Some(last) if last.sender == msg.sender => {
                last.messages.push(msg);
            }
            _ => {
                groups.push(SenderGroup::start(msg));
            }
        }
    }

    groups
}

/// Flattens groups back into the conversation they were built from.
pub fn flatten_groups(groups: Vec<SenderGroup>) -> Vec<Message> {
    groups.into_iter().flat_map(|g| g.messages).collect()
}

/// Statistics about one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub message_count: usize,
    pub group_count: usize,
    pub sender_count: usize,
    pub system_message_count: usize,
    pub media: MediaCounts,
}

impl ConversionStats {
    /// Collects statistics over grouped messages.
    pub fn collect(
        groups: &[SenderGroup],
        sender_count: usize,
        system_sender: &str,
        classifier: &MediaClassifier,
    ) -> Self {
        let mut stats = Self {
            group_count: groups.len(),
            sender_count,
            ..Self::default()
        };

        for message in groups.iter().flat_map(|g| &g.messages) {
            stats.message_count += 1;
            if message.sender == system_sender {
                stats.system_message_count += 1;
            }
            stats.media.record(&classifier.classify(&message.body));
        }

        stats
    }

    /// Average number of messages per group.
    pub fn messages_per_group(&self) -> f64 {
        if self.group_count == 0 {
            return 0.0;
        }
        self.message_count as f64 / self.group_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaConfig;
    use chrono::TimeZone;

    fn msg(minute: u32, sender: &str, body: &str) -> Message {
        Message::new(
            Utc.with_ymd_and_hms(2020, 1, 1, 10, minute, 0).unwrap(),
            sender,
            body,
        )
    }

    #[test]
    fn test_two_senders_two_groups() {
        let groups = group_by_sender(vec![msg(0, "Alice", "Hi there"), msg(1, "Bob", "Hello!")]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].sender, "Alice");
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[1].sender, "Bob");
    }

    #[test]
    fn test_non_adjacent_runs_not_merged() {
        let groups = group_by_sender(vec![
            msg(0, "Alice", "1"),
            msg(1, "Alice", "2"),
            msg(2, "Bob", "3"),
            msg(3, "Alice", "4"),
        ]);
        let shape: Vec<_> = groups.iter().map(|g| (g.sender.as_str(), g.len())).collect();
        assert_eq!(shape, [("Alice", 2), ("Bob", 1), ("Alice", 1)]);
        assert_eq!(
            groups[0].first_timestamp(),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(
            groups[0].last_timestamp(),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 10, 1, 0).unwrap())
        );
    }

    #[test]
    fn test_empty_conversation() {
        assert!(group_by_sender(Vec::new()).is_empty());
    }

    #[test]
    fn test_flatten_restores_conversation() {
        let conversation = vec![msg(0, "A", "1"), msg(1, "B", "2"), msg(2, "A", "3")];
        let groups = group_by_sender(conversation.clone());
        assert_eq!(flatten_groups(groups), conversation);
    }

    #[test]
    fn test_stats() {
        let groups = group_by_sender(vec![
            msg(0, "System", "Alice entrou"),
            msg(1, "Alice", "IMG-1.jpg (arquivo anexado)"),
            msg(2, "Alice", "oi"),
            msg(3, "Bob", "Chamada de voz perdida"),
        ]);
        let classifier = MediaClassifier::new(&MediaConfig::default());
        let stats = ConversionStats::collect(&groups, 3, "System", &classifier);

        assert_eq!(stats.message_count, 4);
        assert_eq!(stats.group_count, 3);
        assert_eq!(stats.sender_count, 3);
        assert_eq!(stats.system_message_count, 1);
        assert_eq!(stats.media.image, 1);
        assert_eq!(stats.media.missed_call, 1);
        assert_eq!(stats.media.plain_text, 2);
        assert!((stats.messages_per_group() - 4.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats_ratio() {
        assert_eq!(ConversionStats::default().messages_per_group(), 0.0);
    }
}
