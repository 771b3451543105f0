//! CSV output writer.

use std::fs::File;
use std::io::{self, Write};

use crate::Post;
use crate::core::models::OutputConfig;
use crate::core::text::normalize_opt;
use crate::error::{PostsiftError, Result};

/// Writes posts to CSV.
///
/// # Format
/// - Delimiter: `OutputConfig::delimiter` (`;` by default)
/// - Columns: `Sender`, `Timestamp`, `Text`, `Type`, plus `Normalized`
///   when enabled
/// - Missing values are written as empty fields
/// - Encoding: UTF-8
pub fn write_csv(posts: &[Post], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(posts, file, config)
}

/// Converts posts to a CSV string.
pub fn to_csv(posts: &[Post], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(posts, &mut buffer, config)?;
    String::from_utf8(buffer)
        .map_err(|e| PostsiftError::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn write_records<W: Write>(posts: &[Post], out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(out);

    writer.write_record(build_header(config))?;

    for post in posts {
        writer.write_record(build_record(post, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Sender", "Timestamp", "Text", "Type"];
    if config.include_normalized {
        header.push("Normalized");
    }
    header
}

/// Build CSV record for a single post.
fn build_record(post: &Post, config: &OutputConfig) -> Vec<String> {
    let mut record = vec![
        post.sender().unwrap_or_default().to_string(),
        post.timestamp
            .map(|ts| config.format_timestamp(ts))
            .unwrap_or_default(),
        post.text().unwrap_or_default().to_string(),
        post.message_type.code().to_string(),
    ];

    if config.include_normalized {
        record.push(normalize_opt(post.text()));
    }

    record
}
