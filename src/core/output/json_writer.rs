//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use super::format_timestamp;
use crate::core::document::{ArchiveDocument, Side, SourceInfo};
use crate::core::media::MediaCategory;
use crate::core::models::OutputConfig;
use crate::core::palette::SenderPalette;
use crate::core::processor::{ConversionStats, SenderGroup};
use crate::error::Result;

#[derive(Serialize)]
struct JsonDocument<'a> {
    source: &'a SourceInfo,
    palette: &'a SenderPalette,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a ConversionStats>,
    groups: Vec<JsonGroup<'a>>,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    sender: &'a str,
    side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    css_class: Option<&'a str>,
    messages: Vec<JsonMessage<'a>>,
}

#[derive(Serialize)]
struct JsonMessage<'a> {
    timestamp: String,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<MediaCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_path: Option<String>,
}

impl<'a> JsonGroup<'a> {
    fn from_group(group: &'a SenderGroup, doc: &'a ArchiveDocument, config: &OutputConfig) -> Self {
        let entry = doc.palette_entry(group);
        Self {
            sender: &group.sender,
            side: doc.side_of(group),
            color: entry.map(|e| e.color.to_string()),
            css_class: entry.map(|e| e.css_class.as_str()),
            messages: group
                .messages
                .iter()
                .map(|msg| {
                    let media = config.include_media.then(|| doc.classify(msg));
                    let media_path = media.as_ref().and_then(|m| doc.media_path(m));
                    JsonMessage {
                        timestamp: format_timestamp(msg.timestamp),
                        body: &msg.body,
                        media,
                        media_path,
                    }
                })
                .collect(),
        }
    }
}

/// Writes the document to a JSON file.
///
/// # Format
/// ```json
/// {
///   "source": {"basename": "chat.txt", "full_path": "/home/me/chat.txt"},
///   "palette": [{"sender": "Alice", "color": {"r": 151, "g": 120, "b": 187}, "css_class": "Alice"}],
///   "stats": {"message_count": 1, ...},
///   "groups": [
///     {"sender": "Alice", "side": "right", "color": "rgb(151, 120, 187)", "css_class": "Alice",
///      "messages": [{"timestamp": "2020-01-01T10:00:00Z", "body": "Hi", "media": {"kind": "plain_text"}}]}
///   ]
/// }
/// ```
pub fn write_json(doc: &ArchiveDocument, output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(doc, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the document to a pretty-printed JSON string.
pub fn to_json(doc: &ArchiveDocument, config: &OutputConfig) -> Result<String> {
    let json_doc = JsonDocument {
        source: &doc.source,
        palette: &doc.palette,
        stats: config.include_stats.then_some(&doc.stats),
        groups: doc
            .groups
            .iter()
            .map(|g| JsonGroup::from_group(g, doc, config))
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&json_doc)?)
}
