//! Output format selection.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatarchive::Result<()> {
//! use chatarchive::config::ArchiveConfig;
//! use chatarchive::core::{OutputConfig, SourceInfo, convert_str};
//! use chatarchive::format::{OutputFormat, to_format_string};
//!
//! let doc = convert_str(
//!     "1/1/20, 10:00 AM - Alice: Hello!",
//!     SourceInfo::named("chat.txt"),
//!     &ArchiveConfig::default(),
//! )?;
//!
//! let csv = to_format_string(&doc, OutputFormat::Csv, &OutputConfig::new())?;
//! assert!(csv.starts_with("Timestamp;Sender"));
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("archive.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::document::ArchiveDocument;
use crate::core::models::OutputConfig;
use crate::error::ArchiveError;

/// Output format for archive documents.
///
/// - [`Json`](OutputFormat::Json) - the whole document: groups, palette, source, stats
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line with its group index
/// - [`Csv`](OutputFormat::Csv) - one message per row
///
/// # Example
///
/// ```rust
/// use chatarchive::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Pretty-printed JSON document (default)
    #[default]
    Json,

    /// JSON Lines, also known as NDJSON
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
            OutputFormat::Csv => "text/csv",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatarchive::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out.csv").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("out.html").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self, ArchiveError> {
        let ext = std::path::Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ArchiveError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: json, jsonl, csv"),
            )),
        }
    }

    /// Name of the cargo feature this format needs.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
            OutputFormat::Csv => "csv-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> ArchiveError {
    ArchiveError::invalid_format(
        "output",
        format!(
            "Output format {} requires the '{}' feature to be enabled",
            format,
            format.required_feature()
        ),
    )
}

/// Writes a document to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    doc: &ArchiveDocument,
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ArchiveError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(doc, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(doc, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(doc, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts a document to a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(
    doc: &ArchiveDocument,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ArchiveError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(doc, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(doc, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(doc, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}
