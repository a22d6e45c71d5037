//! CSV output writer.

use std::fs::File;
use std::io::Write;

use super::format_timestamp;
use crate::core::document::ArchiveDocument;
use crate::core::models::OutputConfig;
use crate::error::{ArchiveError, Result};

/// Writes the document to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Sender`, `Group`, `Media`, `Body`
///   (`Media` is dropped when media output is disabled)
/// - `Media` holds the category label, e.g. `image`
/// - Multi-line bodies are quoted
/// - Encoding: UTF-8
///
/// Records are serialized before the file is created, so a failure leaves
/// no partial file behind.
pub fn write_csv(doc: &ArchiveDocument, output_path: &str, config: &OutputConfig) -> Result<()> {
    let csv = to_csv(doc, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;
    Ok(())
}

/// Converts the document to a CSV string.
pub fn to_csv(doc: &ArchiveDocument, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(doc, config, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ArchiveError::invalid_format("csv", e.to_string()))
}

fn write_records<W: Write>(doc: &ArchiveDocument, config: &OutputConfig, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;

    for (index, group) in doc.groups.iter().enumerate() {
        let group_index = index.to_string();
        for msg in &group.messages {
            let timestamp = format_timestamp(msg.timestamp);
            let mut record = vec![timestamp.as_str(), msg.sender.as_str(), group_index.as_str()];
            let media = config.include_media.then(|| doc.classify(msg));
            if let Some(media) = &media {
                record.push(media.label());
            }
            record.push(msg.body.as_str());
            writer.write_record(&record)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Timestamp", "Sender", "Group"];
    if config.include_media {
        header.push("Media");
    }
    header.push("Body");
    header
}
