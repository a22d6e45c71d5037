//! `WhatsApp` TXT export parser.
//!
//! Recognized header shapes (any of `" - "`, `": "`, `" "` after the time):
//! - `1/1/20, 10:00 AM - Alice: Hi there`
//! - `[15/01/2024, 10:30:45] Alice: Hi there`
//! - `01/01/2020 10:00 - Alice saiu` (system line, no sender)
//!
//! Anything else continues the previous message.

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parser::Parser;
use crate::parsing::HeaderMatcher;

use super::segmenter::segment_lines;

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatarchive::parser::Parser;
/// use chatarchive::parsers::WhatsAppParser;
///
/// let parser = WhatsAppParser::new()?;
/// let messages = parser.parse_str(
///     "1/1/20, 10:00 AM - Alice: Hi there\n1/1/20, 10:01 AM - Bob: Hello!",
/// )?;
/// assert_eq!(messages.len(), 2);
/// # Ok::<(), chatarchive::ArchiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WhatsAppParser {
    config: ParserConfig,
    matcher: HeaderMatcher,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        let matcher = HeaderMatcher::new(&config)?;
        Ok(Self { config, matcher })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the header matcher.
    pub fn matcher(&self) -> &HeaderMatcher {
        &self.matcher
    }

    /// Parses already-split lines.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Result<Vec<Message>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segment_lines(&self.matcher, lines)
    }
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        // Exports written by some phones start with a byte-order mark
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        self.parse_lines(content.lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_name() {
        let parser = WhatsAppParser::new().unwrap();
        assert_eq!(Parser::name(&parser), "WhatsApp");
    }

    #[test]
    fn test_parse_str_crlf_and_bom() {
        let parser = WhatsAppParser::new().unwrap();
        let content = "\u{FEFF}1/1/20, 10:00 AM - Alice: one\r\ntwo\r\n1/1/20, 10:01 AM - Bob: three\r\n";
        let messages = parser.parse_str(content).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "one\ntwo");
        assert_eq!(messages[1].body, "three");
    }

    #[test]
    fn test_parse_empty_string() {
        let parser = WhatsAppParser::new().unwrap();
        assert!(parser.parse_str("").unwrap().is_empty());
    }

    #[test]
    fn test_custom_system_sender() {
        let parser =
            WhatsAppParser::with_config(ParserConfig::new().with_system_sender("WhatsApp"))
                .unwrap();
        let messages = parser
            .parse_str("1/1/20, 10:00 AM - As mensagens são protegidas")
            .unwrap();
        assert_eq!(messages[0].sender, "WhatsApp");
        assert_eq!(parser.config().system_sender, "WhatsApp");
    }

    #[test]
    fn test_parse_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1/1/20, 10:00 AM - Alice: from a file").unwrap();
        let parser = WhatsAppParser::new().unwrap();
        let messages = parser.parse(file.path()).unwrap();
        assert_eq!(messages[0].body, "from a file");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let parser = WhatsAppParser::new().unwrap();
        let err = parser
            .parse(std::path::Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
