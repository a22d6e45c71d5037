//! The structure handed to renderers.
//!
//! An [`ArchiveDocument`] bundles everything a renderer needs: sender
//! groups, the sender palette, where the transcript came from and a few
//! statistics. Media categories are computed on demand with
//! [`ArchiveDocument::classify`].
//!
//! # Example
//!
//! ```rust
//! use chatarchive::config::ArchiveConfig;
//! use chatarchive::core::{SourceInfo, convert_str};
//!
//! let doc = convert_str(
//!     "1/1/20, 10:00 AM - Alice: Hi there\n1/1/20, 10:01 AM - Bob: Hello!",
//!     SourceInfo::named("chat.txt"),
//!     &ArchiveConfig::default(),
//! )?;
//!
//! assert_eq!(doc.groups.len(), 2);
//! assert_eq!(doc.palette.len(), 2);
//! assert_eq!(doc.source.basename, "chat.txt");
//! # Ok::<(), chatarchive::ArchiveError>(())
//! ```

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::media::{MediaCategory, MediaClassifier};
use super::palette::{PaletteEntry, SenderPalette};
use super::processor::{ConversionStats, SenderGroup, flatten_groups, group_by_sender};
use crate::Message;
use crate::config::{ArchiveConfig, MediaConfig};
use crate::error::Result;
use crate::parser::Parser;
use crate::parsers::WhatsAppParser;

/// Where a transcript came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// File name without directories, e.g. `Conversa do WhatsApp com Ana.txt`
    pub basename: String,
    /// Absolute path when it could be resolved, the given path otherwise
    pub full_path: String,
}

impl SourceInfo {
    /// Describes a transcript file.
    pub fn from_path(path: &Path) -> Self {
        let full_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            basename,
            full_path: full_path.display().to_string(),
        }
    }

    /// Describes in-memory content under a display name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            basename: name.clone(),
            full_path: name,
        }
    }
}

/// Conversations with at most this many senders (system included) are laid
/// out on two sides.
pub const TWO_SIDED_MAX_SENDERS: usize = 3;

/// Where a renderer places a sender group.
///
/// In a conversation with at most [`TWO_SIDED_MAX_SENDERS`] senders, the
/// sender named in the transcript's file name (the chat partner, as in
/// `Conversa do WhatsApp com Ana.txt`) goes on the left and everyone else
/// on the right. Larger groups put everyone on the left. System lines are
/// centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Center,
}

/// Grouped conversation plus palette, source and statistics.
#[derive(Debug, Clone)]
pub struct ArchiveDocument {
    pub source: SourceInfo,
    pub groups: Vec<SenderGroup>,
    pub palette: SenderPalette,
    pub stats: ConversionStats,
    system_sender: String,
    media: MediaConfig,
    classifier: MediaClassifier,
}

impl ArchiveDocument {
    /// Groups a parsed conversation and computes its palette and stats.
    pub fn build(source: SourceInfo, messages: Vec<Message>, config: &ArchiveConfig) -> Self {
        let palette = SenderPalette::from_messages(&messages, &config.palette);
        let groups = group_by_sender(messages);
        let classifier = MediaClassifier::new(&config.media);
        let stats = ConversionStats::collect(
            &groups,
            palette.len(),
            &config.parser.system_sender,
            &classifier,
        );

        debug!(
            "{}: {} messages in {} groups from {} senders",
            source.basename, stats.message_count, stats.group_count, stats.sender_count
        );

        Self {
            source,
            groups,
            palette,
            stats,
            system_sender: config.parser.system_sender.clone(),
            media: config.media.clone(),
            classifier,
        }
    }

    /// Layout side of a group.
    pub fn side_of(&self, group: &SenderGroup) -> Side {
        if group.sender == self.system_sender {
            Side::Center
        } else if self.palette.len() <= TWO_SIDED_MAX_SENDERS
            && !self.source.basename.contains(group.sender.as_str())
        {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Media category of a message body.
    pub fn classify(&self, message: &Message) -> MediaCategory {
        self.classifier.classify(&message.body)
    }

    /// Attachment path of a category under the configured media directory.
    pub fn media_path(&self, category: &MediaCategory) -> Option<String> {
        category.media_path(&self.media)
    }

    pub fn media_config(&self) -> &MediaConfig {
        &self.media
    }

    /// Palette entry of a group's sender.
    pub fn palette_entry(&self, group: &SenderGroup) -> Option<&PaletteEntry> {
        self.palette.get(&group.sender)
    }

    /// All messages in conversation order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.groups.iter().flat_map(|g| g.messages.iter())
    }

    /// Gives the conversation back, in its original order.
    pub fn into_conversation(self) -> Vec<Message> {
        flatten_groups(self.groups)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Parses transcript content and builds its document.
pub fn convert_str(
    content: &str,
    source: SourceInfo,
    config: &ArchiveConfig,
) -> Result<ArchiveDocument> {
    config.validate()?;
    let parser = WhatsAppParser::with_config(config.parser.clone())?;
    let messages = parser.parse_str(content)?;
    Ok(ArchiveDocument::build(source, messages, config))
}

/// Reads a transcript file and builds its document.
pub fn convert_file(path: &Path, config: &ArchiveConfig) -> Result<ArchiveDocument> {
    config.validate()?;
    let parser = WhatsAppParser::with_config(config.parser.clone())?;
    let messages = parser.parse(path)?;
    Ok(ArchiveDocument::build(
        SourceInfo::from_path(path),
        messages,
        config,
    ))
}
