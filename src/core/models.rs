//! Output configuration shared by the writers.

use chrono::{DateTime, FixedOffset, Utc};

use super::zone::utc;

/// Configuration for output.
/// Controls how timestamps are rendered and which extra columns are written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Zone used to render timestamps (default: UTC)
    pub zone: FixedOffset,
    /// CSV field delimiter (default: `;`)
    pub delimiter: u8,
    /// Also write the normalized text the matcher saw
    pub include_normalized: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            zone: utc(),
            delimiter: b';',
            include_normalized: false,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_normalized(mut self) -> Self {
        self.include_normalized = true;
        self
    }

    /// Renders a timestamp in the configured zone.
    pub fn format_timestamp(&self, ts: DateTime<Utc>) -> String {
        ts.with_timezone(&self.zone)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
