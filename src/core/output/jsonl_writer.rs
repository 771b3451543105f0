//! JSON Lines (JSONL) output writer.
//!
//! One post per line, suitable for piping into other tools.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::Post;
use crate::core::models::OutputConfig;
use crate::core::text::normalize_opt;
use crate::error::Result;

/// Post structure for JSONL output. Missing values are omitted.
#[derive(Serialize)]
struct JsonlPost<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(rename = "type")]
    message_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<String>,
}

impl<'a> JsonlPost<'a> {
    fn from_post(post: &'a Post, config: &OutputConfig) -> Self {
        Self {
            sender: post.sender(),
            timestamp: post
                .timestamp
                .map(|ts| ts.with_timezone(&config.zone).to_rfc3339()),
            text: post.text(),
            message_type: post.message_type.code(),
            normalized: config
                .include_normalized
                .then(|| normalize_opt(post.text())),
        }
    }
}

/// Writes posts to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"jmilei","text":"Hola","type":"T"}
/// {"sender":"jmilei","type":"R"}
/// ```
pub fn write_jsonl(posts: &[Post], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(posts, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts posts to a JSONL string.
pub fn to_jsonl(posts: &[Post], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for post in posts {
        out.push_str(&serde_json::to_string(&JsonlPost::from_post(post, config))?);
        out.push('\n');
    }
    Ok(out)
}

fn write_lines<W: Write>(posts: &[Post], writer: &mut W, config: &OutputConfig) -> Result<()> {
    for post in posts {
        let line = serde_json::to_string(&JsonlPost::from_post(post, config))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_jsonl_basic() {
        let posts = vec![
            Post::new("Hola").with_sender("jmilei"),
            Post::repost("RT").with_sender("otro"),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&posts, path, &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["sender"], "jmilei");
        assert_eq!(first["text"], "Hola");
        assert_eq!(first["type"], "T");

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["type"], "R");
    }

    #[test]
    fn test_to_jsonl_timestamp_and_missing_fields() {
        use chrono::TimeZone;

        let ts = chrono::Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        let post = Post::new("x").without_text().with_timestamp(ts);

        let out = to_jsonl(&[post], &OutputConfig::new()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(out.trim()).unwrap();

        assert_eq!(parsed["timestamp"], "2024-06-15T12:30:00+00:00");
        assert!(parsed.get("text").is_none());
        assert!(parsed.get("sender").is_none());
        assert!(parsed.get("normalized").is_none());
    }

    #[test]
    fn test_to_jsonl_normalized() {
        let out = to_jsonl(&[Post::new("Él")], &OutputConfig::new().with_normalized()).unwrap();
        assert!(out.contains("\"normalized\":\"el\""));
    }
}
