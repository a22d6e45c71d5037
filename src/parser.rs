//! Parser trait for transcript exports.
//!
//! This module provides the single entry point the rest of the crate (and
//! the CLI) uses to turn an export into a [`Conversation`](crate::core::Conversation).
//!
//! # Example
//!
//! ```rust,no_run
//! use chatarchive::parser::Parser;
//! use chatarchive::parsers::WhatsAppParser;
//! use std::path::Path;
//!
//! let parser = WhatsAppParser::new()?;
//! let messages = parser.parse(Path::new("Conversa do WhatsApp com Ana.txt"))?;
//! println!("{} messages", messages.len());
//! # Ok::<(), chatarchive::ArchiveError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Trait implemented by transcript parsers.
///
/// Implementors only need [`parse_str`](Parser::parse_str); reading from a
/// file is provided.
pub trait Parser: Send + Sync {
    /// Returns a human-readable name of the export format.
    fn name(&self) -> &'static str;

    /// Parses transcript content held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the first line is not a header or a header has an
    /// impossible date/time.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>>;

    /// Parses a transcript file.
    ///
    /// The whole file is read into memory before parsing.
    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }
}
