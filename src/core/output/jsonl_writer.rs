//! JSON Lines (JSONL) output writer.
//!
//! One object per message, in conversation order. Each line carries the
//! index of the sender group it belongs to, so groups can be rebuilt
//! without reading the whole file.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use super::format_timestamp;
use crate::Message;
use crate::core::document::ArchiveDocument;
use crate::core::media::MediaCategory;
use crate::core::models::OutputConfig;
use crate::error::Result;

#[derive(Serialize)]
struct JsonlMessage<'a> {
    sender: &'a str,
    timestamp: String,
    body: &'a str,
    group: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<MediaCategory>,
}

impl<'a> JsonlMessage<'a> {
    fn new(msg: &'a Message, group: usize, doc: &ArchiveDocument, config: &OutputConfig) -> Self {
        Self {
            sender: &msg.sender,
            timestamp: format_timestamp(msg.timestamp),
            body: &msg.body,
            group,
            color: doc.palette.color_of(&msg.sender).map(|c| c.to_string()),
            media: config.include_media.then(|| doc.classify(msg)),
        }
    }
}

fn for_each_line(
    doc: &ArchiveDocument,
    config: &OutputConfig,
    mut emit: impl FnMut(&JsonlMessage<'_>) -> Result<()>,
) -> Result<()> {
    for (index, group) in doc.groups.iter().enumerate() {
        for msg in &group.messages {
            emit(&JsonlMessage::new(msg, index, doc, config))?;
        }
    }
    Ok(())
}

/// Writes the document as JSON Lines.
///
/// ```jsonl
/// {"sender":"Alice","timestamp":"2020-01-01T10:00:00Z","body":"Hi","group":0,"color":"rgb(151, 120, 187)","media":{"kind":"plain_text"}}
/// {"sender":"Bob","timestamp":"2020-01-01T10:01:00Z","body":"Hello!","group":1,"color":"rgb(118, 164, 129)","media":{"kind":"plain_text"}}
/// ```
pub fn write_jsonl(doc: &ArchiveDocument, output_path: &str, config: &OutputConfig) -> Result<()> {
    let jsonl = to_jsonl(doc, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(jsonl.as_bytes())?;
    Ok(())
}

/// Converts the document to a JSON Lines string.
pub fn to_jsonl(doc: &ArchiveDocument, config: &OutputConfig) -> Result<String> {
    let mut output = String::new();

    for_each_line(doc, config, |line| {
        output.push_str(&serde_json::to_string(line)?);
        output.push('\n');
        Ok(())
    })?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchiveConfig;
    use crate::core::document::{SourceInfo, convert_str};
    use tempfile::NamedTempFile;

    fn doc() -> ArchiveDocument {
        convert_str(
            "1/1/20, 10:00 AM - Alice: Hi\n1/1/20, 10:01 AM - Alice: again\nmore\n1/1/20, 10:02 AM - Bob: Chamada de voz perdida",
            SourceInfo::named("chat.txt"),
            &ArchiveConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_to_jsonl_one_line_per_message() {
        let jsonl = to_jsonl(&doc(), &OutputConfig::new()).unwrap();
        let lines: Vec<serde_json::Value> = jsonl
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["group"], 0);
        assert_eq!(lines[1]["group"], 0);
        assert_eq!(lines[1]["body"], "again\nmore");
        assert_eq!(lines[2]["group"], 1);
        assert_eq!(lines[2]["media"]["kind"], "missed_call");
        assert_eq!(lines[0]["color"], lines[1]["color"]);
    }

    #[test]
    fn test_to_jsonl_without_media() {
        let jsonl = to_jsonl(&doc(), &OutputConfig::new().without_media()).unwrap();
        assert!(!jsonl.contains("\"media\""));
    }

    #[test]
    fn test_write_jsonl_matches_string() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        let doc = doc();
        let config = OutputConfig::new();

        write_jsonl(&doc, path, &config).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, to_jsonl(&doc, &config).unwrap());
    }

    #[test]
    fn test_empty_document() {
        let doc = convert_str("", SourceInfo::named("e"), &ArchiveConfig::default()).unwrap();
        assert_eq!(to_jsonl(&doc, &OutputConfig::new()).unwrap(), "");
    }
}
