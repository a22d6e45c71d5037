//! Deterministic sender colors.
//!
//! Each distinct sender gets an RGB color derived from an xxh3 hash of
//! its name, with every channel inside the configured range. The same
//! input always produces the same palette.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::Message;
use crate::config::PaletteConfig;

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One palette slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub sender: String,
    pub color: Rgb,
    pub css_class: String,
}

/// Color assigned to `sender` under `config`.
///
/// ```rust
/// use chatarchive::config::PaletteConfig;
/// use chatarchive::core::palette::sender_color;
///
/// let config = PaletteConfig::default();
/// let color = sender_color("Alice", &config);
/// assert_eq!(color, sender_color("Alice", &config));
/// assert!((100..=200).contains(&color.r));
/// ```
pub fn sender_color(sender: &str, config: &PaletteConfig) -> Rgb {
    let hash = xxh3_64(sender.as_bytes());
    let min = u64::from(config.min_channel);
    let span = u64::from(config.max_channel.saturating_sub(config.min_channel)) + 1;
    let channel = |shift: u32| ((min + ((hash >> shift) & 0xffff) % span).min(255)) as u8;

    Rgb::new(channel(0), channel(16), channel(32))
}

/// CSS class token for a sender: spaces become `-`, `+` becomes `b`, dots
/// are dropped.
pub fn css_class(sender: &str, prefix: &str) -> String {
    let mut class = String::with_capacity(prefix.len() + sender.len());
    class.push_str(prefix);
    for c in sender.chars() {
        match c {
            ' ' => class.push('-'),
            '+' => class.push('b'),
            '.' => {}
            other => class.push(other),
        }
    }
    class
}

/// Sender to color mapping in first-seen order.
///
/// # Example
///
/// ```rust
/// use chatarchive::config::PaletteConfig;
/// use chatarchive::core::palette::SenderPalette;
///
/// let mut palette = SenderPalette::new(PaletteConfig::default());
/// palette.assign("Bob");
/// palette.assign("Alice");
/// palette.assign("Bob");
///
/// let senders: Vec<_> = palette.iter().map(|e| e.sender.as_str()).collect();
/// assert_eq!(senders, ["Bob", "Alice"]);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SenderPalette {
    #[serde(skip)]
    config: PaletteConfig,
    entries: Vec<PaletteEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SenderPalette {
    pub fn new(config: PaletteConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds the palette for every sender of `messages`.
    pub fn from_messages(messages: &[Message], config: &PaletteConfig) -> Self {
        let mut palette = Self::new(config.clone());
        for message in messages {
            palette.assign(&message.sender);
        }
        palette
    }

    /// Returns the entry for `sender`, creating it on first sight.
    pub fn assign(&mut self, sender: &str) -> &PaletteEntry {
        let position = match self.index.get(sender) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.entries.push(PaletteEntry {
                    sender: sender.to_string(),
                    color: sender_color(sender, &self.config),
                    css_class: css_class(sender, &self.config.class_prefix),
                });
                self.index.insert(sender.to_string(), position);
                position
            }
        };
        &self.entries[position]
    }

    pub fn get(&self, sender: &str) -> Option<&PaletteEntry> {
        self.index.get(sender).map(|&i| &self.entries[i])
    }

    pub fn color_of(&self, sender: &str) -> Option<Rgb> {
        self.get(sender).map(|e| e.color)
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
