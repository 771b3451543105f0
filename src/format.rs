//! Output format selection.
//!
//! Library-first format types that don't depend on CLI frameworks.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv", feature = "json-output"))]
//! # fn example() -> postsift::Result<()> {
//! use postsift::format::{OutputFormat, to_format_string};
//! use postsift::core::models::OutputConfig;
//! use postsift::Post;
//!
//! let posts = vec![Post::new("Hola").with_sender("jmilei")];
//!
//! let format = OutputFormat::from_path("filtered.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let jsonl = to_format_string(&posts, format, &OutputConfig::new())?;
//! assert!(jsonl.contains("\"sender\":\"jmilei\""));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::Post;
use crate::core::models::OutputConfig;
use crate::error::PostsiftError;

/// Output format for the filtered posts.
///
/// - [`Csv`](OutputFormat::Csv) - opens directly in a spreadsheet
/// - [`Jsonl`](OutputFormat::Jsonl) - one JSON object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON Lines - one JSON object per line
    ///
    /// Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use postsift::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Jsonl]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: &str) -> Result<Self, PostsiftError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(PostsiftError::invalid_format(
                "output",
                format!("Unknown file extension: '.{}'. Expected one of: csv, jsonl", ext),
            )),
        }
    }

    /// Feature that has to be enabled to write this format.
    fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes posts to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    posts: &[Post],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), PostsiftError> {
    match format {
        #[cfg(feature = "csv")]
        OutputFormat::Csv => crate::core::output::write_csv(posts, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(posts, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Converts posts to a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(
    posts: &[Post],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, PostsiftError> {
    match format {
        #[cfg(feature = "csv")]
        OutputFormat::Csv => crate::core::output::to_csv(posts, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(posts, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

fn feature_disabled(format: OutputFormat) -> PostsiftError {
    PostsiftError::invalid_format(
        "output",
        format!(
            "Output format {} requires the '{}' feature to be enabled",
            format,
            format.required_feature()
        ),
    )
}
