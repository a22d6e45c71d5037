//! Unified error types for chatarchive.
//!
//! This module provides a single [`ArchiveError`] enum that covers all error
//! cases in the library, following the pattern used by crates like
//! `serde_json` and `csv`.
//!
//! # Fatal vs. lenient
//!
//! Only two conditions abort a conversion:
//! - [`ArchiveError::HeaderParse`]: a line looks like a header but its
//!   date/time is not a real calendar date/time
//! - [`ArchiveError::MalformedInput`]: the first line is not a header, so
//!   there is no message to attach it to
//!
//! Every later line that is not a header is merged into the previous
//! message and never reported.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatarchive operations.
///
/// # Example
///
/// ```rust
/// use chatarchive::error::Result;
/// use chatarchive::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The error type for all chatarchive operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// A line has the lexical shape of a header, but its date or time
    /// cannot be interpreted.
    #[error(
        "Invalid date/time on line {line_number}: {line:?} ({reason}). \
         Patterns tried: named={named_pattern:?}, headerless={headerless_pattern:?}"
    )]
    HeaderParse {
        /// 1-based line number in the transcript
        line_number: usize,
        /// The offending line, verbatim
        line: String,
        /// Why the date/time was rejected
        reason: String,
        /// The named-sender grammar
        named_pattern: String,
        /// The headerless grammar
        headerless_pattern: String,
    },

    /// The first line of the transcript does not start a message.
    #[error(
        "Can't parse the first line (line {line_number}): {line:?}. \
         Patterns tried: named={named_pattern:?}, headerless={headerless_pattern:?}"
    )]
    MalformedInput {
        /// 1-based line number in the transcript
        line_number: usize,
        /// The offending line, verbatim
        line: String,
        /// The named-sender grammar
        named_pattern: String,
        /// The headerless grammar
        headerless_pattern: String,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error, or an unreadable JSON config file.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An output format or file extension that isn't supported.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A configuration value that parses but makes no sense.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ArchiveError {
    /// Creates a header parse error for the given line.
    pub fn header_parse(
        line_number: usize,
        line: impl Into<String>,
        reason: impl Into<String>,
        named_pattern: impl Into<String>,
        headerless_pattern: impl Into<String>,
    ) -> Self {
        ArchiveError::HeaderParse {
            line_number,
            line: line.into(),
            reason: reason.into(),
            named_pattern: named_pattern.into(),
            headerless_pattern: headerless_pattern.into(),
        }
    }

    /// Creates a malformed input error for an unparseable first line.
    pub fn malformed_input(
        line_number: usize,
        line: impl Into<String>,
        named_pattern: impl Into<String>,
        headerless_pattern: impl Into<String>,
    ) -> Self {
        ArchiveError::MalformedInput {
            line_number,
            line: line.into(),
            named_pattern: named_pattern.into(),
            headerless_pattern: headerless_pattern.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ArchiveError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ArchiveError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ArchiveError::Io(_))
    }

    /// Returns `true` if this is a header date/time error.
    pub fn is_header_parse(&self) -> bool {
        matches!(self, ArchiveError::HeaderParse { .. })
    }

    /// Returns `true` if the transcript did not start with a header.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ArchiveError::MalformedInput { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ArchiveError::InvalidFormat { .. })
    }

    /// Returns `true` if a configuration was rejected.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ArchiveError::InvalidConfig { .. })
    }

    /// Returns the transcript line number for parse errors.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            ArchiveError::HeaderParse { line_number, .. }
            | ArchiveError::MalformedInput { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
