//! Output configuration shared by the writers.

/// Controls which derived fields the writers emit.
///
/// Messages always carry timestamp, sender and body; media categories and
/// statistics can be left out for smaller files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include each message's media category (and attachment path)
    pub include_media: bool,
    /// Include conversion statistics (JSON only)
    pub include_stats: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_media: true,
            include_stats: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops media categories from the output.
    #[must_use]
    pub fn without_media(mut self) -> Self {
        self.include_media = false;
        self
    }

    /// Drops statistics from the output.
    #[must_use]
    pub fn without_stats(mut self) -> Self {
        self.include_stats = false;
        self
    }
}
