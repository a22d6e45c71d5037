//! Line-to-message segmentation.
//!
//! The segmenter is a two-state machine fed one line at a time:
//!
//! | State | Header line | Other line |
//! |-------|-------------|------------|
//! | awaiting first message | start a message | fatal [`ArchiveError::MalformedInput`] |
//! | in message | finish current, start a new one | append to current body |
//!
//! Continuation lines are appended with `\n`, trailing whitespace trimmed.
//! Lines are never reordered or dropped.

use chrono::{DateTime, Utc};
use log::{debug, trace};

use crate::Message;
use crate::error::{ArchiveError, Result};
use crate::parsing::{Header, HeaderMatcher};

/// A message whose body may still grow.
#[derive(Debug)]
struct PartialMessage {
    timestamp: DateTime<Utc>,
    sender: String,
    body: String,
}

impl PartialMessage {
    fn from_header(header: Header) -> Self {
        Self {
            timestamp: header.timestamp,
            sender: header.sender,
            body: header.body,
        }
    }

    fn push_line(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line.trim_end());
    }

    fn finish(self) -> Message {
        Message::new(self.timestamp, self.sender, self.body)
    }
}

#[derive(Debug)]
enum State {
    AwaitingFirstMessage,
    InMessage(PartialMessage),
}

/// Incremental segmenter over transcript lines.
///
/// # Example
///
/// ```rust
/// use chatarchive::config::ParserConfig;
/// use chatarchive::parsers::Segmenter;
/// use chatarchive::parsing::HeaderMatcher;
///
/// let matcher = HeaderMatcher::new(&ParserConfig::default())?;
/// let mut segmenter = Segmenter::new(&matcher);
///
/// segmenter.push_line("1/1/20, 10:00 AM - Alice: Line one")?;
/// segmenter.push_line("Line two")?;
/// let messages = segmenter.finish();
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].body, "Line one\nLine two");
/// # Ok::<(), chatarchive::ArchiveError>(())
/// ```
#[derive(Debug)]
pub struct Segmenter<'m> {
    matcher: &'m HeaderMatcher,
    state: State,
    messages: Vec<Message>,
    line_number: usize,
}

impl<'m> Segmenter<'m> {
    /// Creates a segmenter in the awaiting-first-message state.
    pub fn new(matcher: &'m HeaderMatcher) -> Self {
        Self {
            matcher,
            state: State::AwaitingFirstMessage,
            messages: Vec::new(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_consumed(&self) -> usize {
        self.line_number
    }

    /// Feeds one line (without its line terminator).
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.line_number += 1;

        match self.matcher.parse_line(line, self.line_number)? {
            Some(header) => {
                let next = State::InMessage(PartialMessage::from_header(header));
                if let State::InMessage(done) = std::mem::replace(&mut self.state, next) {
                    self.messages.push(done.finish());
                }
            }
            None => match &mut self.state {
                State::InMessage(current) => {
                    trace!("line {}: continuation", self.line_number);
                    current.push_line(line);
                }
                State::AwaitingFirstMessage => {
                    return Err(ArchiveError::malformed_input(
                        self.line_number,
                        line,
                        self.matcher.named_pattern(),
                        self.matcher.headerless_pattern(),
                    ));
                }
            },
        }

        Ok(())
    }

    /// Finalizes the pending message and returns the conversation.
    pub fn finish(mut self) -> Vec<Message> {
        if let State::InMessage(current) = self.state {
            self.messages.push(current.finish());
        }
        debug!(
            "segmented {} lines into {} messages",
            self.line_number,
            self.messages.len()
        );
        self.messages
    }
}

/// Segments a whole sequence of lines into messages.
///
/// An empty sequence yields an empty conversation.
pub fn segment_lines<'a, I>(matcher: &HeaderMatcher, lines: I) -> Result<Vec<Message>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut segmenter = Segmenter::new(matcher);
    for line in lines {
        segmenter.push_line(line)?;
    }
    Ok(segmenter.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use chrono::TimeZone;

    fn matcher() -> HeaderMatcher {
        HeaderMatcher::new(&ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_two_messages() {
        let m = matcher();
        let messages = segment_lines(
            &m,
            [
                "1/1/20, 10:00 AM - Alice: Hi there",
                "1/1/20, 10:01 AM - Bob: Hello!",
            ],
        )
        .unwrap();

        assert_eq!(
            messages,
            vec![
                Message::new(
                    Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap(),
                    "Alice",
                    "Hi there"
                ),
                Message::new(
                    Utc.with_ymd_and_hms(2020, 1, 1, 10, 1, 0).unwrap(),
                    "Bob",
                    "Hello!"
                ),
            ]
        );
    }

    #[test]
    fn test_continuation_lines() {
        let m = matcher();
        let messages =
            segment_lines(&m, ["1/1/20, 10:00 AM - Alice: Line one", "Line two"]).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "Line one\nLine two");
    }

    #[test]
    fn test_continuation_trailing_whitespace_trimmed() {
        let m = matcher();
        let messages = segment_lines(
            &m,
            ["1/1/20, 10:00 AM - Alice: one", "  two  \t", "", "four"],
        )
        .unwrap();
        assert_eq!(messages[0].body, "one\n  two\n\nfour");
    }

    #[test]
    fn test_first_line_without_header_is_fatal() {
        let m = matcher();
        let err = segment_lines(&m, ["hello, this has no header"]).unwrap_err();
        assert!(err.is_malformed_input());
        let display = err.to_string();
        assert!(display.contains("hello, this has no header"));
        // Patterns are quoted with their backslashes escaped
        assert!(display.contains(&format!("{:?}", m.named_pattern())));
        assert!(display.contains(&format!("{:?}", m.headerless_pattern())));
        assert!(display.contains("(?P<name>[^:]+)"));
    }

    #[test]
    fn test_blank_first_line_is_fatal() {
        let m = matcher();
        let err = segment_lines(&m, ["", "1/1/20, 10:00 AM - Alice: hi"]).unwrap_err();
        assert!(err.is_malformed_input());
        assert_eq!(err.line_number(), Some(1));
    }

    #[test]
    fn test_empty_input_is_empty_conversation() {
        let m = matcher();
        let messages = segment_lines(&m, std::iter::empty()).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_header_parse_error_propagates_with_line_number() {
        let m = matcher();
        let err = segment_lines(
            &m,
            ["1/1/20, 10:00 AM - Alice: hi", "31/31/20, 10:00 - Bob: hi"],
        )
        .unwrap_err();
        assert!(err.is_header_parse());
        assert_eq!(err.line_number(), Some(2));
    }

    #[test]
    fn test_rejected_headerless_becomes_continuation() {
        let m = matcher();
        let messages = segment_lines(
            &m,
            [
                "1/1/20, 10:00 AM - Alice: look",
                "15/01/2024, 10:30 - not a header",
            ],
        )
        .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "look\n15/01/2024, 10:30 - not a header");
    }

    #[test]
    fn test_system_line_gets_placeholder_sender() {
        let m = matcher();
        let messages = segment_lines(
            &m,
            [
                "1/1/20, 10:00 AM - Alice created group \"Trip\"",
                "1/1/20, 10:01 AM - Alice: welcome",
            ],
        )
        .unwrap();
        assert_eq!(messages[0].sender, "System");
        assert_eq!(messages[1].sender, "Alice");
    }

    #[test]
    fn test_incremental_api_counts_lines() {
        let m = matcher();
        let mut segmenter = Segmenter::new(&m);
        segmenter.push_line("1/1/20, 10:00 AM - Alice: a").unwrap();
        segmenter.push_line("b").unwrap();
        assert_eq!(segmenter.lines_consumed(), 2);
        assert_eq!(segmenter.finish().len(), 1);
    }
}
