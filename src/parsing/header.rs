//! Header recognition for transcript lines.
//!
//! A transcript line either starts a new message (a *header*) or continues
//! the previous one. Two header grammars exist, tried in order:
//!
//! - Named: `1/1/20, 10:00 AM - Alice: Hi there`
//! - Headerless (system events): `1/1/20, 10:00 AM - Alice created group "Trip"`
//!
//! The headerless grammar is loose enough to match body text that merely
//! starts with a number, so it is only accepted when the date+time prefix
//! has the configured width (16 characters by default, as in
//! `1/1/20, 10:00 AM` or `01/01/2020 10:00`).

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::config::ParserConfig;
use crate::error::{ArchiveError, Result};

use super::timestamp::parse_header_timestamp;

const DATE: &str = r"(?P<date>[0-9/-]+)";
const TIME: &str = r"(?P<time>[0-9:]+(?: [AP]M)?)";
const SEPARATOR: &str = r"(?: - |: | )";
const NAME: &str = r"(?P<name>[^:]+)";

fn datetime_pattern() -> String {
    format!(r"\[?{DATE},? {TIME}\]?")
}

/// Returns the named-sender grammar as a regex pattern.
pub fn named_pattern() -> String {
    format!(r"^{}{SEPARATOR}{NAME}: (?P<body>.*)$", datetime_pattern())
}

/// Returns the headerless grammar as a regex pattern.
pub fn headerless_pattern() -> String {
    format!(r"^{}{SEPARATOR}(?P<body>.*)$", datetime_pattern())
}

/// The parts of a recognized header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Parsed date and time
    pub timestamp: DateTime<Utc>,
    /// Sender name, or the system placeholder for headerless lines
    pub sender: String,
    /// Text after the header on the same line
    pub body: String,
}

/// Outcome of matching one line against the header grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    /// `date, time - sender: body`
    Named(Header),
    /// `date, time - body`, attributed to the system sender
    Headerless(Header),
    /// Not a header; the line continues the previous message
    NoMatch,
}

impl HeaderMatch {
    /// Returns the header, if the line was one.
    pub fn into_header(self) -> Option<Header> {
        match self {
            HeaderMatch::Named(header) | HeaderMatch::Headerless(header) => Some(header),
            HeaderMatch::NoMatch => None,
        }
    }

    /// Returns `true` unless this is [`HeaderMatch::NoMatch`].
    pub fn is_header(&self) -> bool {
        !matches!(self, HeaderMatch::NoMatch)
    }
}

/// Recognizes header lines and extracts timestamp, sender and body.
///
/// # Example
///
/// ```rust
/// use chatarchive::config::ParserConfig;
/// use chatarchive::parsing::{HeaderMatch, HeaderMatcher};
///
/// let matcher = HeaderMatcher::new(&ParserConfig::default())?;
///
/// let matched = matcher.match_line("1/1/20, 10:00 AM - Alice: Hi there", 1)?;
/// let HeaderMatch::Named(header) = matched else { panic!("expected a named header") };
/// assert_eq!(header.sender, "Alice");
/// assert_eq!(header.body, "Hi there");
///
/// assert_eq!(matcher.match_line("just some text", 2)?, HeaderMatch::NoMatch);
/// # Ok::<(), chatarchive::ArchiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    named: Regex,
    headerless: Regex,
    datetime: Regex,
    system_sender: String,
    headerless_span_width: usize,
}

impl HeaderMatcher {
    /// Compiles the header grammars.
    pub fn new(config: &ParserConfig) -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| ArchiveError::invalid_format("header", e.to_string()))
        };

        Ok(Self {
            named: compile(&named_pattern())?,
            headerless: compile(&headerless_pattern())?,
            datetime: compile(&format!("^{}", datetime_pattern()))?,
            system_sender: config.system_sender.clone(),
            headerless_span_width: config.headerless_span_width,
        })
    }

    /// Returns the named-sender pattern this matcher uses.
    pub fn named_pattern(&self) -> &str {
        self.named.as_str()
    }

    /// Returns the headerless pattern this matcher uses.
    pub fn headerless_pattern(&self) -> &str {
        self.headerless.as_str()
    }

    /// Matches a single line.
    ///
    /// `line_number` is only used for error reporting. Fails with
    /// [`ArchiveError::HeaderParse`] when a line has the shape of a header
    /// but an impossible date or time.
    pub fn match_line(&self, line: &str, line_number: usize) -> Result<HeaderMatch> {
        if let Some(caps) = self.named.captures(line) {
            let timestamp = self.timestamp(&caps, line, line_number)?;
            return Ok(HeaderMatch::Named(Header {
                timestamp,
                sender: caps["name"].to_string(),
                body: caps["body"].to_string(),
            }));
        }

        let Some(caps) = self.headerless.captures(line) else {
            return Ok(HeaderMatch::NoMatch);
        };

        if self.datetime_span(line) != Some(self.headerless_span_width) {
            return Ok(HeaderMatch::NoMatch);
        }

        let timestamp = self.timestamp(&caps, line, line_number)?;
        Ok(HeaderMatch::Headerless(Header {
            timestamp,
            sender: self.system_sender.clone(),
            body: caps["body"].to_string(),
        }))
    }

    /// Convenience wrapper returning just the header, if any.
    pub fn parse_line(&self, line: &str, line_number: usize) -> Result<Option<Header>> {
        self.match_line(line, line_number)
            .map(HeaderMatch::into_header)
    }

    /// Width in characters of the date+time prefix, if the line has one.
    fn datetime_span(&self, line: &str) -> Option<usize> {
        self.datetime
            .find(line)
            .map(|m| m.as_str().chars().count())
    }

    fn timestamp(
        &self,
        caps: &regex::Captures<'_>,
        line: &str,
        line_number: usize,
    ) -> Result<DateTime<Utc>> {
        parse_header_timestamp(&caps["date"], &caps["time"]).map_err(|reason| {
            ArchiveError::header_parse(
                line_number,
                line,
                reason,
                self.named_pattern(),
                self.headerless_pattern(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn matcher() -> HeaderMatcher {
        HeaderMatcher::new(&ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_named_header_dash_separator() {
        let m = matcher()
            .match_line("1/1/20, 10:00 AM - Alice: Hi there", 1)
            .unwrap();
        let HeaderMatch::Named(header) = m else {
            panic!("expected named header, got {m:?}");
        };
        assert_eq!(
            header.timestamp,
            Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(header.sender, "Alice");
        assert_eq!(header.body, "Hi there");
    }

    #[test]
    fn test_named_header_bracketed() {
        let header = matcher()
            .parse_line("[15/01/2024, 10:30:45] Bob: Olá: tudo bem?", 1)
            .unwrap()
            .unwrap();
        assert_eq!(header.sender, "Bob");
        assert_eq!(header.body, "Olá: tudo bem?");
        assert_eq!(
            header.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap()
        );
    }

    #[test]
    fn test_named_header_without_comma() {
        let header = matcher()
            .parse_line("15/01/2024 10:30 - Ana Maria: oi", 1)
            .unwrap()
            .unwrap();
        assert_eq!(header.sender, "Ana Maria");
        assert_eq!(header.body, "oi");
    }

    #[test]
    fn test_named_header_empty_body() {
        let header = matcher()
            .parse_line("1/1/20, 10:00 AM - Alice: ", 1)
            .unwrap()
            .unwrap();
        assert_eq!(header.body, "");
    }

    #[test]
    fn test_named_takes_precedence_over_headerless() {
        // Also matches the headerless grammar with a 16-character prefix
        let m = matcher()
            .match_line("1/1/20, 10:00 AM - Alice: Hi", 1)
            .unwrap();
        assert!(matches!(m, HeaderMatch::Named(_)));
    }

    #[test]
    fn test_headerless_accepted_at_sixteen_chars() {
        let m = matcher()
            .match_line("1/1/20, 10:00 AM - Alice created group \"Trip\"", 1)
            .unwrap();
        let HeaderMatch::Headerless(header) = m else {
            panic!("expected headerless header, got {m:?}");
        };
        assert_eq!(header.sender, "System");
        assert_eq!(header.body, "Alice created group \"Trip\"");
    }

    #[test]
    fn test_headerless_rejected_at_other_widths() {
        // "15/01/2024, 10:30" is 17 characters wide
        let m = matcher()
            .match_line("15/01/2024, 10:30 - Alice left", 1)
            .unwrap();
        assert_eq!(m, HeaderMatch::NoMatch);

        // "1/1/20 9:00" is 11 characters wide
        let m = matcher().match_line("1/1/20 9:00 - alarm", 1).unwrap();
        assert_eq!(m, HeaderMatch::NoMatch);
    }

    #[test]
    fn test_headerless_width_is_configurable() {
        let config = ParserConfig::new()
            .with_headerless_span_width(17)
            .with_system_sender("WhatsApp");
        let matcher = HeaderMatcher::new(&config).unwrap();
        let header = matcher
            .parse_line("15/01/2024, 10:30 - Alice left", 1)
            .unwrap()
            .unwrap();
        assert_eq!(header.sender, "WhatsApp");
        assert_eq!(header.body, "Alice left");
    }

    #[test]
    fn test_plain_text_is_no_match() {
        let m = matcher();
        assert_eq!(m.match_line("hello there", 1).unwrap(), HeaderMatch::NoMatch);
        assert_eq!(m.match_line("", 1).unwrap(), HeaderMatch::NoMatch);
        assert_eq!(
            m.match_line("2020 was a strange year", 1).unwrap(),
            HeaderMatch::NoMatch
        );
    }

    #[test]
    fn test_impossible_date_is_header_parse_error() {
        let err = matcher()
            .match_line("31/31/20, 10:00 - Bob: hi", 4)
            .unwrap_err();
        assert!(err.is_header_parse());
        assert_eq!(err.line_number(), Some(4));
        let display = err.to_string();
        assert!(display.contains("31/31/20"));
        assert!(display.contains("(?P<name>"));
    }

    #[test]
    fn test_headerless_width_checked_before_date() {
        // Wrong width: rejected as a header, so no date error
        let m = matcher().match_line("99/99/9999, 99:99 - x", 1).unwrap();
        assert_eq!(m, HeaderMatch::NoMatch);
    }

    #[test]
    fn test_patterns_exposed() {
        let m = matcher();
        assert!(m.named_pattern().contains("(?P<name>"));
        assert!(!m.headerless_pattern().contains("(?P<name>"));
        assert_eq!(m.named_pattern(), named_pattern());
    }
}
