//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`Mode`] - Text match mode as a CLI value
//! - [`Format`] - Output format as a CLI value
//! - [`TypeArg`] - Message type as a CLI value

use clap::{ArgAction, Parser, ValueEnum};

use crate::core::matcher::MatchMode;
use crate::error::PostsiftError;
use crate::format::OutputFormat;
use crate::post::MessageType;

/// Filter a post archive by sender, type, date and text, and export the
/// result.
#[derive(Parser, Debug, Clone)]
#[command(name = "postsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    postsift tuits.csv -q 'pelotudo|perio|burro'
    postsift tuits.csv -q perio -m contains --type t --monthly
    postsift tuits.csv --from 2024-01-01 --to 2024-06-30 --utc-offset -03:00 -o enero_junio.csv
    postsift tuits.csv --sender jmilei -q casta -o casta.jsonl -f jsonl")]
pub struct Args {
    /// Path to the CSV archive
    pub input: String,

    /// Search terms, alternatives separated by '|'
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// How search terms must appear in the text
    #[arg(short, long, value_enum, default_value = "exact")]
    pub mode: Mode,

    /// Keep posts from this sender (repeatable)
    #[arg(long = "sender", value_name = "NAME")]
    pub senders: Vec<String>,

    /// Keep posts of this type (repeatable)
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub types: Vec<TypeArg>,

    /// Keep posts on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Keep posts on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Zone for dates, month buckets and timestamps without offset
    #[arg(long, value_name = "OFFSET", default_value = "+00:00", allow_hyphen_values = true)]
    pub utc_offset: String,

    /// Field delimiter of the input CSV
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Fail on rows with an unknown message type instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Write the filtered posts to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Output format (defaults to the output file extension, then CSV)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Add a column with the normalized text the search ran against
    #[arg(long)]
    pub normalized: bool,

    /// Print post counts per month
    #[arg(long)]
    pub monthly: bool,

    /// Print the first N filtered posts
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub show: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Text match mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Whole words only
    #[value(alias = "word")]
    Exact,

    /// Anywhere in the text, catches roots and variations
    #[value(alias = "root")]
    Contains,
}

impl From<Mode> for MatchMode {
    fn from(mode: Mode) -> MatchMode {
        match mode {
            Mode::Exact => MatchMode::ExactWord,
            Mode::Contains => MatchMode::Contains,
        }
    }
}

/// Message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    /// Original posts
    #[value(name = "t", alias = "T")]
    Original,

    /// Reposts
    #[value(name = "r", alias = "R")]
    Repost,
}

impl From<TypeArg> for MessageType {
    fn from(arg: TypeArg) -> MessageType {
        match arg {
            TypeArg::Original => MessageType::Original,
            TypeArg::Repost => MessageType::Repost,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// CSV with semicolon delimiter
    Csv,

    /// JSON Lines
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> OutputFormat {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Jsonl => OutputFormat::Jsonl,
        }
    }
}

impl Args {
    /// Output format: explicit flag, else the output extension, else CSV.
    pub fn output_format(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|path| OutputFormat::from_path(path).ok())
            .unwrap_or_default()
    }

    /// The input delimiter as a CSV byte. Only ASCII is accepted, since any
    /// other byte would cut through multi-byte UTF-8 sequences.
    pub fn delimiter_byte(&self) -> Result<u8, PostsiftError> {
        if !self.delimiter.is_ascii() {
            return Err(PostsiftError::invalid_format(
                "input",
                format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ),
            ));
        }
        Ok(self.delimiter as u8)
    }

    /// Log level implied by `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
