//! Media classification of message bodies.
//!
//! WhatsApp exports attachments, locations and call notices as plain text.
//! The classifier turns a body into a [`MediaCategory`] by walking an
//! ordered list of [`MediaRule`]s; the first rule whose pattern matches
//! wins, and bodies matching none are [`MediaCategory::PlainText`].
//!
//! Default rule order (categories overlap lexically, so order matters):
//!
//! 1. missed call: body equals a missed-call notice
//! 2. location: body contains `localização:`
//! 3. audio: body ends with `.opus (arquivo anexado)`, `.mp3 (arquivo anexado)` or `.mp3`
//! 4. video: body ends with `.mp4 (arquivo anexado)`
//! 5. image: body contains `.jpg (arquivo anexado)` or `.webp (arquivo anexado)`
//! 6. generic file: body contains `(arquivo anexado)`
//!
//! Marker text inside an ordinary message is indistinguishable from a real
//! attachment; such bodies are classified as attachments.
//!
//! # Example
//!
//! ```rust
//! use chatarchive::config::MediaConfig;
//! use chatarchive::core::media::{MediaCategory, MediaClassifier};
//!
//! let classifier = MediaClassifier::new(&MediaConfig::default());
//!
//! assert_eq!(
//!     classifier.classify("IMG-001.jpg (arquivo anexado)"),
//!     MediaCategory::Image { filename: "IMG-001.jpg".into() },
//! );
//! assert_eq!(classifier.classify("bom dia"), MediaCategory::PlainText);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::MediaConfig;

/// Content category of a message body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaCategory {
    /// Ordinary text, possibly spanning several lines
    PlainText,
    /// Missed voice or video call notice
    MissedCall,
    /// Shared location; `coords` is the link or coordinates text
    LocationShare { coords: String },
    /// Audio attachment
    Audio { filename: String },
    /// Video attachment
    Video { filename: String },
    /// Image attachment
    Image { filename: String },
    /// Any other attachment, with the text to show for the download link
    GenericFile {
        filename: String,
        display_text: String,
    },
}

impl MediaCategory {
    /// Stable lowercase name of the category.
    pub fn label(&self) -> &'static str {
        match self {
            MediaCategory::PlainText => "plain_text",
            MediaCategory::MissedCall => "missed_call",
            MediaCategory::LocationShare { .. } => "location_share",
            MediaCategory::Audio { .. } => "audio",
            MediaCategory::Video { .. } => "video",
            MediaCategory::Image { .. } => "image",
            MediaCategory::GenericFile { .. } => "generic_file",
        }
    }

    /// Attachment file name, for the attachment categories.
    pub fn filename(&self) -> Option<&str> {
        match self {
            MediaCategory::Audio { filename }
            | MediaCategory::Video { filename }
            | MediaCategory::Image { filename }
            | MediaCategory::GenericFile { filename, .. } => Some(filename),
            _ => None,
        }
    }

    /// Returns `true` for the attachment categories.
    pub fn is_attachment(&self) -> bool {
        self.filename().is_some()
    }

    /// Path of the attachment relative to the configured media directory.
    ///
    /// ```rust
    /// use chatarchive::config::MediaConfig;
    /// use chatarchive::core::media::MediaCategory;
    ///
    /// let audio = MediaCategory::Audio { filename: "PTT-01.opus".into() };
    /// assert_eq!(
    ///     audio.media_path(&MediaConfig::default()).as_deref(),
    ///     Some("./Midias/PTT-01.opus"),
    /// );
    /// ```
    pub fn media_path(&self, config: &MediaConfig) -> Option<String> {
        self.filename().map(|name| {
            if config.media_dir.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", config.media_dir.trim_end_matches('/'), name)
            }
        })
    }
}

/// Which category a rule produces when it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    MissedCall,
    LocationShare,
    Audio,
    Video,
    Image,
    GenericFile,
}

/// How a rule inspects the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPattern {
    /// Body equals one of the strings
    OneOf(Vec<String>),
    /// Body contains one of the strings
    Contains(Vec<String>),
    /// Body ends with one of the strings
    EndsWith(Vec<String>),
}

impl BodyPattern {
    fn matches(&self, body: &str) -> bool {
        match self {
            BodyPattern::OneOf(values) => values.iter().any(|v| body == v),
            BodyPattern::Contains(values) => values.iter().any(|v| body.contains(v.as_str())),
            BodyPattern::EndsWith(values) => values.iter().any(|v| body.ends_with(v.as_str())),
        }
    }
}

/// One classification rule: a pattern and the category it yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRule {
    pub kind: MediaKind,
    pub pattern: BodyPattern,
}

impl MediaRule {
    pub fn new(kind: MediaKind, pattern: BodyPattern) -> Self {
        Self { kind, pattern }
    }

    /// Returns `true` if the rule applies to the (mark-stripped) body.
    pub fn matches(&self, body: &str) -> bool {
        self.pattern.matches(body)
    }
}

/// Builds the default rule list from a media configuration.
pub fn default_rules(config: &MediaConfig) -> Vec<MediaRule> {
    let suffix = config.attachment_suffix();
    let with_suffix =
        |exts: &[String]| -> Vec<String> { exts.iter().map(|e| format!("{e}{suffix}")).collect() };

    let mut audio = with_suffix(&config.audio_extensions);
    audio.extend(config.bare_audio_extensions.iter().cloned());

    vec![
        MediaRule::new(
            MediaKind::MissedCall,
            BodyPattern::OneOf(config.missed_call_notices.clone()),
        ),
        MediaRule::new(
            MediaKind::LocationShare,
            BodyPattern::Contains(vec![config.location_marker.clone()]),
        ),
        MediaRule::new(MediaKind::Audio, BodyPattern::EndsWith(audio)),
        MediaRule::new(
            MediaKind::Video,
            BodyPattern::EndsWith(with_suffix(&config.video_extensions)),
        ),
        MediaRule::new(
            MediaKind::Image,
            BodyPattern::Contains(with_suffix(&config.image_extensions)),
        ),
        MediaRule::new(
            MediaKind::GenericFile,
            BodyPattern::Contains(vec![config.attachment_marker.clone()]),
        ),
    ]
}

/// Ordered-rule media classifier.
#[derive(Debug, Clone)]
pub struct MediaClassifier {
    rules: Vec<MediaRule>,
    location_marker: String,
    attachment_marker: String,
    leading_marks: Vec<char>,
}

impl MediaClassifier {
    /// Creates a classifier with the default rules for `config`.
    pub fn new(config: &MediaConfig) -> Self {
        Self::with_rules(config, default_rules(config))
    }

    /// Creates a classifier with a custom rule list, evaluated in order.
    pub fn with_rules(config: &MediaConfig, rules: Vec<MediaRule>) -> Self {
        Self {
            rules,
            location_marker: config.location_marker.clone(),
            attachment_marker: config.attachment_marker.clone(),
            leading_marks: config.leading_marks.clone(),
        }
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[MediaRule] {
        &self.rules
    }

    /// Classifies a message body. Never fails.
    pub fn classify(&self, body: &str) -> MediaCategory {
        let body = self.strip_leading_mark(body);

        self.rules
            .iter()
            .find(|rule| rule.matches(body))
            .map_or(MediaCategory::PlainText, |rule| self.extract(rule.kind, body))
    }

    fn extract(&self, kind: MediaKind, body: &str) -> MediaCategory {
        match kind {
            MediaKind::MissedCall => MediaCategory::MissedCall,
            MediaKind::LocationShare => MediaCategory::LocationShare {
                coords: self.location_text(body),
            },
            MediaKind::Audio => MediaCategory::Audio {
                filename: self.filename(body),
            },
            MediaKind::Video => MediaCategory::Video {
                filename: self.filename(body),
            },
            MediaKind::Image => MediaCategory::Image {
                filename: self.filename(body),
            },
            MediaKind::GenericFile => MediaCategory::GenericFile {
                filename: self.filename(body),
                display_text: self.display_text(body),
            },
        }
    }

    fn strip_leading_mark<'b>(&self, body: &'b str) -> &'b str {
        match body.chars().next() {
            Some(c) if self.leading_marks.contains(&c) => &body[c.len_utf8()..],
            _ => body,
        }
    }

    /// Text after the location marker and the single space following it.
    fn location_text(&self, body: &str) -> String {
        body.find(&self.location_marker)
            .map(|i| {
                let rest = &body[i + self.location_marker.len()..];
                rest.strip_prefix(' ').unwrap_or(rest)
            })
            .unwrap_or_default()
            .to_string()
    }

    /// Text before the attachment marker, or the whole body without one.
    fn filename(&self, body: &str) -> String {
        match body.find(&self.attachment_marker) {
            Some(i) => body[..i].trim_end().to_string(),
            None => body.to_string(),
        }
    }

    /// Caption after the marker's closing parenthesis, falling back to the
    /// body with the marker phrase removed.
    fn display_text(&self, body: &str) -> String {
        let trailing = body
            .find(&self.attachment_marker)
            .map(|i| body[i + self.attachment_marker.len()..].trim())
            .unwrap_or_default();

        if trailing.is_empty() {
            body.replace(&format!(" {}", self.attachment_marker), "")
                .replace(&self.attachment_marker, "")
        } else {
            trailing.to_string()
        }
    }
}

/// Per-category message counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCounts {
    pub plain_text: usize,
    pub missed_call: usize,
    pub location_share: usize,
    pub audio: usize,
    pub video: usize,
    pub image: usize,
    pub generic_file: usize,
}

impl MediaCounts {
    /// Counts one classified body.
    pub fn record(&mut self, category: &MediaCategory) {
        let slot = match category {
            MediaCategory::PlainText => &mut self.plain_text,
            MediaCategory::MissedCall => &mut self.missed_call,
            MediaCategory::LocationShare { .. } => &mut self.location_share,
            MediaCategory::Audio { .. } => &mut self.audio,
            MediaCategory::Video { .. } => &mut self.video,
            MediaCategory::Image { .. } => &mut self.image,
            MediaCategory::GenericFile { .. } => &mut self.generic_file,
        };
        *slot += 1;
    }

    /// Number of attachment messages.
    pub fn attachments(&self) -> usize {
        self.audio + self.video + self.image + self.generic_file
    }

    /// Total number of classified messages.
    pub fn total(&self) -> usize {
        self.plain_text + self.missed_call + self.location_share + self.attachments()
    }
}
