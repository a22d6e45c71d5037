//! Line-level parsing utilities.
//!
//! This module contains the header grammars and the timestamp parser used
//! by the [`Segmenter`](crate::parsers::Segmenter).

pub mod header;
pub mod timestamp;

// Re-export commonly used items
pub use header::{Header, HeaderMatch, HeaderMatcher, headerless_pattern, named_pattern};
pub use timestamp::parse_header_timestamp;
