//! Core processing logic for chatarchive.
//!
//! This module contains:
//! - [`media`] - Media classification of message bodies
//! - [`palette`] - Deterministic sender colors
//! - [`processor`] - Sender grouping and statistics
//! - [`document`] - The structure handed to renderers
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (JSON, JSONL, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! use chatarchive::config::ArchiveConfig;
//! use chatarchive::core::{SourceInfo, convert_str};
//!
//! let doc = convert_str(
//!     "1/1/20, 10:00 AM - Alice: IMG-001.jpg (arquivo anexado)",
//!     SourceInfo::named("chat.txt"),
//!     &ArchiveConfig::default(),
//! )?;
//! let first = doc.messages().next().unwrap();
//! assert_eq!(doc.classify(first).label(), "image");
//! # Ok::<(), chatarchive::ArchiveError>(())
//! ```

pub mod document;
pub mod media;
pub mod models;
pub mod output;
pub mod palette;
pub mod processor;

pub use document::{ArchiveDocument, Side, SourceInfo, convert_file, convert_str};
pub use media::{MediaCategory, MediaClassifier, MediaCounts, MediaRule};
pub use models::OutputConfig;
pub use palette::{PaletteEntry, Rgb, SenderPalette};
pub use processor::{ConversionStats, SenderGroup, flatten_groups, group_by_sender};

pub use crate::Message;

/// An ordered sequence of messages, in input line order.
pub type Conversation = Vec<Message>;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
