//! Configuration for reading a post archive.
//!
//! [`DatasetConfig`] describes where each [`Post`](crate::Post) field lives
//! in a CSV file and how raw values are interpreted. The defaults match the
//! column names of the archive this tool was built for
//! (`emisor`, `tipo_mensaje`, `fecha_milei`, `texto`).
//!
//! # Example
//!
//! ```rust
//! use postsift::config::DatasetConfig;
//! use postsift::core::zone::parse_utc_offset;
//!
//! # fn main() -> postsift::Result<()> {
//! let config = DatasetConfig::new()
//!     .with_text_column("content")
//!     .with_delimiter(b';')
//!     .with_zone(parse_utc_offset("-03:00")?)
//!     .with_skip_invalid(false);
//! # Ok(())
//! # }
//! ```

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::core::zone::{offset_seconds, utc};

/// Configuration for CSV archive loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Column holding the sender (default: `emisor`)
    pub sender_column: String,

    /// Column holding the message type, `T` or `R` (default: `tipo_mensaje`)
    pub type_column: String,

    /// Column holding the timestamp (default: `fecha_milei`)
    pub timestamp_column: String,

    /// Column holding the post text (default: `texto`)
    pub text_column: String,

    /// Field delimiter (default: `,`)
    pub delimiter: u8,

    /// Zone assumed for timestamps without an explicit offset (default: UTC)
    #[serde(with = "offset_seconds")]
    pub zone: FixedOffset,

    /// Skip rows with an unknown message type instead of failing (default: true)
    pub skip_invalid: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            sender_column: "emisor".to_string(),
            type_column: "tipo_mensaje".to_string(),
            timestamp_column: "fecha_milei".to_string(),
            text_column: "texto".to_string(),
            delimiter: b',',
            zone: utc(),
            skip_invalid: true,
        }
    }
}

impl DatasetConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sender_column(mut self, name: impl Into<String>) -> Self {
        self.sender_column = name.into();
        self
    }

    #[must_use]
    pub fn with_type_column(mut self, name: impl Into<String>) -> Self {
        self.type_column = name.into();
        self
    }

    #[must_use]
    pub fn with_timestamp_column(mut self, name: impl Into<String>) -> Self {
        self.timestamp_column = name.into();
        self
    }

    #[must_use]
    pub fn with_text_column(mut self, name: impl Into<String>) -> Self {
        self.text_column = name.into();
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the zone for timestamps that carry no offset.
    #[must_use]
    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }

    /// Sets whether to skip invalid rows.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::zone::parse_utc_offset;

    #[test]
    fn test_dataset_config_defaults() {
        let config = DatasetConfig::default();
        assert_eq!(config.sender_column, "emisor");
        assert_eq!(config.type_column, "tipo_mensaje");
        assert_eq!(config.timestamp_column, "fecha_milei");
        assert_eq!(config.text_column, "texto");
        assert_eq!(config.delimiter, b',');
        assert!(config.skip_invalid);
    }

    #[test]
    fn test_dataset_config_builder() {
        let art = parse_utc_offset("-03:00").unwrap();
        let config = DatasetConfig::new()
            .with_sender_column("author")
            .with_type_column("kind")
            .with_timestamp_column("date")
            .with_text_column("body")
            .with_delimiter(b';')
            .with_zone(art)
            .with_skip_invalid(false);

        assert_eq!(config.sender_column, "author");
        assert_eq!(config.type_column, "kind");
        assert_eq!(config.timestamp_column, "date");
        assert_eq!(config.text_column, "body");
        assert_eq!(config.delimiter, b';');
        assert_eq!(config.zone, art);
        assert!(!config.skip_invalid);
    }

    #[test]
    fn test_dataset_config_serde() {
        let config = DatasetConfig::new().with_zone(parse_utc_offset("-03:00").unwrap());
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"zone\":-10800"));

        let parsed: DatasetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: DatasetConfig = serde_json::from_str(r#"{"text_column":"body"}"#).unwrap();
        assert_eq!(partial.text_column, "body");
        assert_eq!(partial.sender_column, "emisor");
        assert_eq!(partial.zone, utc());
    }
}
