//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! [`Args::archive_config`] turns the arguments into an
//! [`ArchiveConfig`], so the binary and tests share one code path:
//!
//! ```rust
//! use chatarchive::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatarchive", "chat.txt", "--system-sender", "WhatsApp"]);
//! let config = args.archive_config()?;
//! assert_eq!(config.parser.system_sender, "WhatsApp");
//! # Ok::<(), chatarchive::ArchiveError>(())
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ArchiveConfig;
use crate::error::Result;

/// Default output path; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "chat_archive.json";

/// Convert a WhatsApp chat export into a structured archive
/// (sender groups, colors and media categories) for rendering.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatarchive")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatarchive \"Conversa do WhatsApp com Ana.txt\"
    chatarchive chat.txt -o ana.jsonl -f jsonl
    chatarchive chat.txt -f csv --media-dir ./attachments
    chatarchive chat.txt -c english_export.json --system-sender WhatsApp

LOGGING:
    Progress goes to stderr at info level; use -q or RUST_LOG to change it.")]
pub struct Args {
    /// Path to the exported chat transcript (.txt)
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// JSON configuration file (markers, media directory, palette range)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Sender name for system lines without an author
    #[arg(long, value_name = "NAME")]
    pub system_sender: Option<String>,

    /// Directory attachment paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Loads the configuration file (if any) and applies command-line
    /// overrides on top of it.
    pub fn archive_config(&self) -> Result<ArchiveConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => ArchiveConfig::default(),
        };

        if let Some(sender) = &self.system_sender {
            config.parser.system_sender.clone_from(sender);
        }
        if let Some(dir) = &self.media_dir {
            config.media.media_dir.clone_from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Output path, with the extension switched to the format's when the
    /// default path is used.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let lib_format: crate::format::OutputFormat = self.format.into();
        format!("chat_archive.{}", lib_format.extension())
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }
}

#[cfg(feature = "json-output")]
fn load_config_file(path: &str) -> Result<ArchiveConfig> {
    ArchiveConfig::from_json_file(path)
}

#[cfg(not(feature = "json-output"))]
fn load_config_file(path: &str) -> Result<ArchiveConfig> {
    Err(crate::error::ArchiveError::invalid_config(format!(
        "cannot read {path}: config files need the 'json-output' feature"
    )))
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - the whole document (default)
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line
/// - [`Csv`](OutputFormat::Csv) - one message per row, semicolon-delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON document
    #[default]
    Json,

    /// JSON Lines - one JSON object per message
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}
