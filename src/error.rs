//! Unified error types for postsift.
//!
//! This module provides a single [`PostsiftError`] enum covering every
//! fallible operation in the library: loading a dataset, configuring
//! filters, and writing output.
//!
//! The text search engine ([`crate::core::text`], [`crate::core::matcher`])
//! never returns an error. Any string is a valid query, so it does not
//! appear here.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for postsift operations.
///
/// # Example
///
/// ```rust
/// use postsift::error::Result;
/// use postsift::Post;
///
/// fn my_function() -> Result<Vec<Post>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, PostsiftError>;

/// The error type for all postsift operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PostsiftError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the dataset file doesn't exist or the
    /// output file can't be created.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing error.
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Invalid UTC offset, e.g. for `--utc-offset`.
    #[error("Invalid UTC offset '{input}'. Expected format: {expected}")]
    InvalidOffset {
        /// The invalid offset string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A column required by the dataset configuration is missing from the
    /// header row.
    #[error("Missing column '{column}' in dataset header")]
    MissingColumn {
        /// The configured column name that was not found
        column: String,
    },

    /// A dataset row could not be turned into a post.
    ///
    /// Only raised when `skip_invalid` is disabled; otherwise such rows are
    /// skipped with a warning.
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the source file
        line: u64,
        /// Description of what's wrong
        message: String,
    },

    /// Unknown or unsupported output format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },
}

impl PostsiftError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        PostsiftError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid offset error.
    pub fn invalid_offset(input: impl Into<String>) -> Self {
        PostsiftError::InvalidOffset {
            input: input.into(),
            expected: "+HH:MM or -HH:MM",
        }
    }

    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        PostsiftError::MissingColumn {
            column: column.into(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        PostsiftError::InvalidRecord {
            line,
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        PostsiftError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, PostsiftError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, PostsiftError::InvalidDate { .. })
    }

    /// Returns `true` if this error comes from malformed dataset content.
    pub fn is_dataset(&self) -> bool {
        matches!(
            self,
            PostsiftError::MissingColumn { .. } | PostsiftError::InvalidRecord { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = PostsiftError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_invalid_date_display() {
        let err = PostsiftError::invalid_date("2024/01/01");
        assert_eq!(
            err.to_string(),
            "Invalid date '2024/01/01'. Expected format: YYYY-MM-DD"
        );
        assert!(err.is_invalid_date());
        assert!(!err.is_io());
    }

    #[test]
    fn test_invalid_offset_display() {
        let err = PostsiftError::invalid_offset("3");
        assert!(err.to_string().contains("+HH:MM"));
    }

    #[test]
    fn test_dataset_errors() {
        let missing = PostsiftError::missing_column("texto");
        assert_eq!(missing.to_string(), "Missing column 'texto' in dataset header");
        assert!(missing.is_dataset());

        let record = PostsiftError::invalid_record(7, "unknown message type 'X'");
        assert!(record.to_string().contains("line 7"));
        assert!(record.is_dataset());
    }

    #[test]
    fn test_invalid_format_display() {
        let err = PostsiftError::invalid_format("output", "unknown extension");
        assert_eq!(err.to_string(), "Invalid output format: unknown extension");
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PostsiftError::from(json_err);
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostsiftError>();
    }
}
