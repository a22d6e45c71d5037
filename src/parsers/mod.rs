//! Transcript parsers.
//!
//! - [`Segmenter`] / [`segment_lines`] - the line-to-message state machine
//! - [`WhatsAppParser`] - [`Parser`](crate::parser::Parser) implementation
//!   for WhatsApp TXT exports

mod segmenter;
mod whatsapp;

pub use segmenter::{Segmenter, segment_lines};
pub use whatsapp::WhatsAppParser;
