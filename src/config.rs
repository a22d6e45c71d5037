//! Configuration types for parsing, media classification and palettes.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. Every struct has sensible
//! defaults matching the Portuguese-locale WhatsApp export, so the usual
//! entry point is [`ArchiveConfig::default`].
//!
//! - [`ParserConfig`] - header grammar knobs
//! - [`MediaConfig`] - markers and extensions used by the media classifier
//! - [`PaletteConfig`] - sender color range and CSS class naming
//!
//! # Example
//!
//! ```rust
//! use chatarchive::config::{ArchiveConfig, MediaConfig, ParserConfig};
//!
//! let config = ArchiveConfig::new()
//!     .with_parser(ParserConfig::new().with_system_sender("WhatsApp"))
//!     .with_media(MediaConfig::new().with_media_dir("./media"));
//!
//! assert_eq!(config.parser.system_sender, "WhatsApp");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ArchiveError, Result};

/// Configuration for the header matcher and segmenter.
///
/// # Example
///
/// ```rust
/// use chatarchive::config::ParserConfig;
///
/// let config = ParserConfig::new().with_headerless_span_width(19);
/// assert_eq!(config.headerless_span_width, 19);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Sender assigned to headerless (system/event) lines (default: "System")
    pub system_sender: String,

    /// Exact width in characters a headerless date+time prefix must have
    /// to be accepted as a header (default: 16)
    pub headerless_span_width: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            system_sender: "System".to_string(),
            headerless_span_width: 16,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placeholder sender for headerless lines.
    #[must_use]
    pub fn with_system_sender(mut self, sender: impl Into<String>) -> Self {
        self.system_sender = sender.into();
        self
    }

    /// Sets the accepted headerless date+time span width.
    #[must_use]
    pub fn with_headerless_span_width(mut self, width: usize) -> Self {
        self.headerless_span_width = width;
        self
    }
}

/// Markers and extensions recognized by the media classifier.
///
/// Defaults follow the pt-BR export: attachments end with
/// `" (arquivo anexado)"` and locations start with `"localização:"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Exact bodies that denote a missed voice or video call
    pub missed_call_notices: Vec<String>,

    /// Substring that introduces a shared location
    pub location_marker: String,

    /// Phrase appended to attachment file names, without the leading space
    pub attachment_marker: String,

    /// Audio extensions recognized before the attachment marker
    pub audio_extensions: Vec<String>,

    /// Audio extensions recognized at the very end of a body, with no marker
    pub bare_audio_extensions: Vec<String>,

    /// Video extensions recognized before the attachment marker
    pub video_extensions: Vec<String>,

    /// Image extensions recognized before the attachment marker
    pub image_extensions: Vec<String>,

    /// Invisible characters the export may put in front of file names
    pub leading_marks: Vec<char>,

    /// Directory renderers resolve attachment file names against
    pub media_dir: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            missed_call_notices: vec![
                "Chamada de voz perdida".to_string(),
                "Chamada de vídeo perdida".to_string(),
            ],
            location_marker: "localização:".to_string(),
            attachment_marker: "(arquivo anexado)".to_string(),
            audio_extensions: vec![".opus".to_string(), ".mp3".to_string()],
            bare_audio_extensions: vec![".mp3".to_string()],
            video_extensions: vec![".mp4".to_string()],
            image_extensions: vec![".jpg".to_string(), ".webp".to_string()],
            leading_marks: vec!['\u{200E}'],
            media_dir: "./Midias".to_string(),
        }
    }
}

impl MediaConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the attachment suffix as it appears after a file name,
    /// e.g. `" (arquivo anexado)"`.
    pub fn attachment_suffix(&self) -> String {
        format!(" {}", self.attachment_marker)
    }

    /// Sets the missed-call notices.
    #[must_use]
    pub fn with_missed_call_notices<I, S>(mut self, notices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missed_call_notices = notices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the location marker.
    #[must_use]
    pub fn with_location_marker(mut self, marker: impl Into<String>) -> Self {
        self.location_marker = marker.into();
        self
    }

    /// Sets the attachment marker phrase.
    #[must_use]
    pub fn with_attachment_marker(mut self, marker: impl Into<String>) -> Self {
        self.attachment_marker = marker.into();
        self
    }

    /// Sets the media directory.
    #[must_use]
    pub fn with_media_dir(mut self, dir: impl Into<String>) -> Self {
        self.media_dir = dir.into();
        self
    }
}

/// Sender color range and CSS class naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Lowest value of each RGB channel (default: 100)
    pub min_channel: u8,

    /// Highest value of each RGB channel (default: 200)
    pub max_channel: u8,

    /// Prefix prepended to every sender CSS class (default: empty)
    pub class_prefix: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            min_channel: 100,
            max_channel: 200,
            class_prefix: String::new(),
        }
    }
}

impl PaletteConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the channel range.
    #[must_use]
    pub fn with_channel_range(mut self, min: u8, max: u8) -> Self {
        self.min_channel = min;
        self.max_channel = max;
        self
    }

    /// Sets the CSS class prefix.
    #[must_use]
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

/// Top-level configuration for one conversion run.
///
/// Missing sections and fields in a config file fall back to defaults, so a
/// file only needs to name what it changes:
///
/// ```json
/// { "media": { "media_dir": "./attachments" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Header grammar settings
    pub parser: ParserConfig,

    /// Media classifier settings
    pub media: MediaConfig,

    /// Palette settings
    pub palette: PaletteConfig,
}

impl ArchiveConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the parser section.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Replaces the media section.
    #[must_use]
    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = media;
        self
    }

    /// Replaces the palette section.
    #[must_use]
    pub fn with_palette(mut self, palette: PaletteConfig) -> Self {
        self.palette = palette;
        self
    }

    /// Checks values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.palette.min_channel > self.palette.max_channel {
            return Err(ArchiveError::invalid_config(format!(
                "palette.min_channel ({}) exceeds palette.max_channel ({})",
                self.palette.min_channel, self.palette.max_channel
            )));
        }
        if self.parser.system_sender.is_empty() {
            return Err(ArchiveError::invalid_config(
                "parser.system_sender must not be empty",
            ));
        }
        if self.media.attachment_marker.is_empty() {
            return Err(ArchiveError::invalid_config(
                "media.attachment_marker must not be empty",
            ));
        }
        if self.media.location_marker.is_empty() {
            return Err(ArchiveError::invalid_config(
                "media.location_marker must not be empty",
            ));
        }
        // An empty entry would match every body
        let lists = [
            ("missed_call_notices", &self.media.missed_call_notices),
            ("audio_extensions", &self.media.audio_extensions),
            ("bare_audio_extensions", &self.media.bare_audio_extensions),
            ("video_extensions", &self.media.video_extensions),
            ("image_extensions", &self.media.image_extensions),
        ];
        for (name, entries) in lists {
            if entries.iter().any(String::is_empty) {
                return Err(ArchiveError::invalid_config(format!(
                    "media.{name} must not contain empty entries"
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration string.
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
