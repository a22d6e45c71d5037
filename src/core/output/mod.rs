//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_json`] / [`to_json`] - the whole document, pretty-printed - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one message per line - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - one message per row, semicolon delimiter - requires `csv-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | JSON | Renderers that need groups, palette and source info |
//! | JSONL | Line-by-line processing, search indexing |
//! | CSV | Spreadsheets |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatarchive::Result<()> {
//! use chatarchive::config::ArchiveConfig;
//! use chatarchive::core::output::{to_csv, write_json, write_jsonl};
//! use chatarchive::core::{OutputConfig, convert_file};
//! use std::path::Path;
//!
//! let doc = convert_file(Path::new("chat.txt"), &ArchiveConfig::default())?;
//! let config = OutputConfig::new();
//!
//! write_json(&doc, "chat.json", &config)?;
//! write_jsonl(&doc, "chat.jsonl", &config)?;
//! let csv_string = to_csv(&doc, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(any(feature = "csv-output", feature = "json-output"))]
fn format_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
