//! Core processing logic for postsift.
//!
//! This module contains:
//! - [`text`] - URL stripping and accent/case folding
//! - [`matcher`] - Query parsing and the text predicate
//! - [`filter`] - Sender, type, date and text filters combined
//! - [`stats`] - Monthly volume and filter statistics
//! - [`zone`] - Fixed-offset date helpers
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (CSV, JSONL)

pub mod filter;
pub mod matcher;
pub mod models;
pub mod output;
pub mod stats;
pub mod text;
pub mod zone;

// Re-export main types for convenience
pub use filter::{FilterConfig, apply_filters, apply_filters_with_stats};
pub use matcher::{MatchMode, Matcher, apply_text_filter, build_matcher};
pub use models::OutputConfig;
pub use stats::{FilterStats, MonthlyVolume, monthly_volume};
pub use text::{normalize, strip_urls};

// Re-export Post from the crate root
pub use crate::Post;

// Conditionally re-export output writers
#[cfg(feature = "csv")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_jsonl, write_jsonl};
