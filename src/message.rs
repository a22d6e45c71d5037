//! The message record produced by the segmenter.
//!
//! A [`Message`] is one logical entry of a transcript: the header line that
//! opened it plus every continuation line merged into it. Unlike many chat
//! formats, every transcript header carries a timestamp and a sender, so
//! neither is optional here.
//!
//! # Examples
//!
//! ```
//! use chatarchive::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "Line one\nLine two");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.lines().count(), 2);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatarchive::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "Hi there");
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message of a chat transcript.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `DateTime<Utc>` | Header date and time (export local time, stored as UTC) |
/// | `sender` | `String` | Sender name, or the system placeholder for event lines |
/// | `body` | `String` | Message text; continuation lines are joined with `\n` |
///
/// Timestamps serialize as RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as printed in the header.
    pub timestamp: DateTime<Utc>,

    /// Display name of the author.
    pub sender: String,

    /// Text of the message.
    ///
    /// May contain newlines for multi-line messages. Attachments, locations
    /// and call notices are plain text here; see
    /// [`MediaClassifier`](crate::core::media::MediaClassifier).
    pub body: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Iterates over the physical lines of the body.
    pub fn lines(&self) -> std::str::Split<'_, char> {
        self.body.split('\n')
    }

    /// Returns `true` if the body spans more than one line.
    pub fn is_multiline(&self) -> bool {
        self.body.contains('\n')
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
