//! CSV archive reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, warn};

use super::DatasetProvider;
use super::timestamp::parse_timestamp;
use crate::Post;
use crate::config::DatasetConfig;
use crate::error::{PostsiftError, Result};
use crate::post::MessageType;

/// Reads posts from a CSV file.
///
/// Column names, delimiter and timestamp zone come from [`DatasetConfig`].
/// Empty cells become `None`; unparseable timestamps become `None`.
///
/// # Example
///
/// ```rust
/// use postsift::config::DatasetConfig;
/// use postsift::dataset::CsvDataset;
///
/// # fn main() -> postsift::Result<()> {
/// let data = "emisor,tipo_mensaje,fecha_milei,texto\n\
///             jmilei,T,2024-01-15 10:30:00,Hola\n\
///             jmilei,R,not-a-date,\n";
///
/// let posts = CsvDataset::from_reader(data.as_bytes(), &DatasetConfig::new())?;
/// assert_eq!(posts.len(), 2);
/// assert!(posts[1].timestamp().is_none());
/// assert!(posts[1].text().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvDataset {
    path: PathBuf,
    config: DatasetConfig,
}

/// Column positions resolved from the header row.
struct Columns {
    sender: usize,
    message_type: usize,
    timestamp: usize,
    text: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord, config: &DatasetConfig) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| PostsiftError::missing_column(name))
        };

        Ok(Self {
            sender: find(&config.sender_column)?,
            message_type: find(&config.type_column)?,
            timestamp: find(&config.timestamp_column)?,
            text: find(&config.text_column)?,
        })
    }
}

impl CsvDataset {
    /// Creates a reader for `path` with the default configuration.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, DatasetConfig::default())
    }

    pub fn with_config(path: impl Into<PathBuf>, config: DatasetConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Parses posts from any reader producing CSV data.
    pub fn from_reader<R: Read>(reader: R, config: &DatasetConfig) -> Result<Vec<Post>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(config.delimiter)
            .from_reader(reader);

        let columns = Columns::resolve(reader.headers()?, config)?;
        let mut posts = Vec::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());

            match parse_record(&record, &columns, config) {
                Ok(post) => posts.push(post),
                Err(message) if config.skip_invalid => {
                    warn!("Skipping line {}: {}", line, message);
                    skipped += 1;
                }
                Err(message) => return Err(PostsiftError::invalid_record(line, message)),
            }
        }

        debug!("Parsed {} posts, skipped {} rows", posts.len(), skipped);
        Ok(posts)
    }
}

impl DatasetProvider for CsvDataset {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn load(&self) -> Result<Vec<Post>> {
        let file = File::open(&self.path)?;
        Self::from_reader(BufReader::new(file), &self.config)
    }
}

/// Returns the trimmed cell, or `None` if it is missing or blank.
fn cell<'r>(record: &'r StringRecord, index: usize) -> Option<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_record(
    record: &StringRecord,
    columns: &Columns,
    config: &DatasetConfig,
) -> std::result::Result<Post, String> {
    let message_type = match cell(record, columns.message_type) {
        Some(raw) => raw.parse::<MessageType>()?,
        None => return Err("missing message type".to_string()),
    };

    Ok(Post {
        sender: cell(record, columns.sender).map(str::to_string),
        message_type,
        timestamp: cell(record, columns.timestamp)
            .and_then(|raw| parse_timestamp(raw, config.zone)),
        // Keep the text as written; only blank cells count as missing
        text: record
            .get(columns.text)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string),
    })
}
