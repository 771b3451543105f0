//! # Postsift
//!
//! A Rust library for searching and slicing an archive of social-media posts:
//! accent- and case-insensitive text search, sender/type/date filters, and
//! monthly volume counts.
//!
//! ## Overview
//!
//! Every post in the archive is a [`Post`]: an optional sender, a
//! [`MessageType`] (original `T` or repost `R`), an optional timestamp and an
//! optional text. The filter engine takes a `Vec<Post>` and returns the
//! subset that passes every active filter, in the original order.
//!
//! Text search is forgiving by construction:
//! - case and accents are folded (`"CANCIÓN"` matches `"cancion"`)
//! - URLs are ignored on both sides
//! - `|` separates alternatives (`"pelotudo|perio|burro"`)
//! - terms are literal, regex metacharacters have no special meaning
//!
//! ## Quick Start
//!
//! ```rust
//! use postsift::prelude::*;
//!
//! let posts = vec![
//!     Post::new("Pelotudo total"),
//!     Post::new("Es un PELOTUDO"),
//!     Post::new("no aplica"),
//! ];
//!
//! let hits = apply_text_filter(posts, "pelotudo", MatchMode::ExactWord);
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! ## Loading an Archive
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv")]
//! # fn example() -> postsift::Result<()> {
//! use postsift::prelude::*;
//!
//! let cache = CachedDataset::new(CsvDataset::new("tuits.csv"));
//! let posts = cache.get()?.to_vec();
//!
//! let config = FilterConfig::new()
//!     .with_message_type(MessageType::Original)
//!     .with_date_from("2024-01-01")?
//!     .with_query("casta", MatchMode::Contains);
//!
//! let (filtered, stats) = apply_filters_with_stats(posts, &config);
//! println!("{} of {} posts", stats.after_text, stats.total);
//!
//! write_csv(&filtered, "casta.csv", &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`post`] - [`Post`] and [`MessageType`]
//! - [`core`] - the engine
//!   - [`core::text`] - [`normalize`](core::text::normalize), [`strip_urls`](core::text::strip_urls)
//!   - [`core::matcher`] - [`Matcher`](core::matcher::Matcher), [`build_matcher`](core::matcher::build_matcher)
//!   - [`core::filter`] - [`FilterConfig`](core::filter::FilterConfig), [`apply_filters`](core::filter::apply_filters)
//!   - [`core::stats`] - [`monthly_volume`](core::stats::monthly_volume), [`FilterStats`](core::stats::FilterStats)
//!   - [`core::zone`] - fixed-offset date helpers
//!   - [`core::output`] - CSV and JSONL writers
//! - [`dataset`] - [`DatasetProvider`](dataset::DatasetProvider) and the cached CSV loader
//! - [`config`] - [`DatasetConfig`](config::DatasetConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`error`] - [`PostsiftError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod dataset;
pub mod error;
pub mod format;
pub mod post;

// Re-export the main types at the crate root for convenience
pub use error::{PostsiftError, Result};
pub use post::{MessageType, Post};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use postsift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{MessageType, Post};

    pub use crate::error::{PostsiftError, Result};

    // Text engine
    pub use crate::core::matcher::{MatchMode, Matcher, apply_text_filter, build_matcher};
    pub use crate::core::text::{normalize, strip_urls};

    // Filtering and aggregation
    pub use crate::core::filter::{FilterConfig, apply_filters, apply_filters_with_stats};
    pub use crate::core::stats::{FilterStats, MonthlyVolume, monthly_volume};
    pub use crate::core::zone::parse_utc_offset;

    // Data sources
    pub use crate::config::DatasetConfig;
    #[cfg(feature = "csv")]
    pub use crate::dataset::CsvDataset;
    pub use crate::dataset::{CachedDataset, DatasetProvider, InMemoryDataset};

    // Output
    pub use crate::core::models::OutputConfig;
    #[cfg(feature = "csv")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_jsonl, write_jsonl};
    pub use crate::format::{OutputFormat, write_to_format};
}
