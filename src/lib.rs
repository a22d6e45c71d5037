//! # Chatarchive
//!
//! A Rust library for turning exported WhatsApp chat transcripts into
//! structured archive documents that a renderer can turn into a browsable
//! page.
//!
//! ## Overview
//!
//! An export is a plain-text file where each line either starts a message
//! (`1/1/20, 10:00 AM - Alice: Hi there`) or continues the previous one.
//! Chatarchive:
//!
//! 1. segments lines into [`Message`]s, merging continuation lines,
//! 2. groups contiguous messages by sender,
//! 3. assigns every sender a deterministic display color,
//! 4. classifies each body as text, attachment, location or missed call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatarchive::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let doc = convert_file(Path::new("Conversa do WhatsApp com Ana.txt"), &ArchiveConfig::default())?;
//!
//!     for group in &doc.groups {
//!         for msg in &group.messages {
//!             println!("{} [{}] {}", msg.sender, doc.classify(msg).label(), msg.body);
//!         }
//!     }
//!
//!     write_json(&doc, "archive.json", &OutputConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Header grammar and timestamp interpretation
//!   - [`HeaderMatcher`](parsing::HeaderMatcher), [`parse_header_timestamp`](parsing::parse_header_timestamp)
//! - [`parsers`] - Line segmentation and the [`WhatsAppParser`](parsers::WhatsAppParser)
//! - [`parser`] - The [`Parser`](parser::Parser) trait
//! - [`config`] - [`ArchiveConfig`](config::ArchiveConfig) and its sections
//! - [`core`] - Grouping, palette, media classification, documents and writers
//!   - [`core::media`] - [`MediaClassifier`](core::MediaClassifier), [`MediaCategory`](core::MediaCategory)
//!   - [`core::palette`] - [`SenderPalette`](core::SenderPalette)
//!   - [`core::processor`] - [`group_by_sender`](core::group_by_sender), [`ConversionStats`](core::ConversionStats)
//!   - [`core::document`] - [`ArchiveDocument`](core::ArchiveDocument)
//!   - [`core::output`] - JSON, JSONL and CSV writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - `cli` - CLI arguments (feature `cli`)
//! - [`error`] - [`ArchiveError`] and [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ArchiveError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatarchive::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ArchiveError, Result};

    // Parsing
    pub use crate::parser::Parser;
    pub use crate::parsers::WhatsAppParser;

    // Configuration
    pub use crate::config::{ArchiveConfig, MediaConfig, PaletteConfig, ParserConfig};

    // Documents, grouping and classification
    pub use crate::core::{
        ArchiveDocument, Conversation, ConversionStats, MediaCategory, MediaClassifier,
        OutputConfig, SenderGroup, SenderPalette, Side, SourceInfo, convert_file, convert_str,
        group_by_sender,
    };

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
